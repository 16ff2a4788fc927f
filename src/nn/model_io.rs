/*
 * @Author       : 老董
 * @Date         : 2026-03-09
 * @Description  : Network 高层模型 I/O（describe/from_descriptor/save_model/load_model）
 *
 * 记录只包含拓扑（各层大小）与参数数值；梯度和计算图从不持久化。
 * 加载时先按层大小 build 一个新网络，再用记录中的参数覆盖随机初始化的参数。
 */

use super::descriptor::{LayerDescriptor, NetworkDescriptor, NeuronDescriptor};
use super::event::EventLog;
use super::network::Network;
use super::GraphError;
use crate::errors::TensorError;
use crate::tensor::Tensor;
use std::path::Path;
use thiserror::Error;

/// 模型读写错误（与网络状态错误区分开，便于调用方判断"模型文件有问题"）
#[derive(Debug, Error)]
pub enum ModelIoError {
    #[error("模型文件读写失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("模型记录解析失败: {0}")]
    Json(#[from] serde_json::Error),

    #[error("模型记录格式错误: {0}")]
    Malformed(String),

    #[error("参数文本解析失败: {0}")]
    Tensor(#[from] TensorError),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl Network {
    /// 生成网络的可序列化描述；第0层的神经元没有参数，写入空字符串
    pub fn describe(&self) -> Result<NetworkDescriptor, GraphError> {
        let mut layers = Vec::with_capacity(self.size());
        for (i, layer) in self.layers().iter().enumerate() {
            let mut neurons = Vec::with_capacity(layer.size());
            for neuron in layer.neurons() {
                if i == 0 {
                    neurons.push(NeuronDescriptor::empty());
                    continue;
                }
                neurons.push(NeuronDescriptor::new(
                    neuron.weights_text()?.unwrap_or_default(),
                    neuron.biases_text()?.unwrap_or_default(),
                ));
            }
            layers.push(LayerDescriptor {
                size: layer.size(),
                neurons,
            });
        }
        Ok(NetworkDescriptor { layers })
    }

    /// 由描述重建网络：`build(sizes)`后用记录覆盖第1层起每个神经元的参数（可训练叶子）
    pub fn from_descriptor(
        descriptor: &NetworkDescriptor,
        log: &mut EventLog,
    ) -> Result<Self, ModelIoError> {
        for (i, layer) in descriptor.layers.iter().enumerate() {
            if layer.size != layer.neurons.len() {
                return Err(ModelIoError::Malformed(format!(
                    "第{i}层声明含{}个神经元，记录中却有{}个",
                    layer.size,
                    layer.neurons.len()
                )));
            }
        }

        let mut network = Self::build(&descriptor.sizes(), log)?;
        let graph = network.graph().clone();
        for (i, layer_desc) in descriptor.layers.iter().enumerate().skip(1) {
            let layer = network.layer_mut(i)?;
            for (j, neuron_desc) in layer_desc.neurons.iter().enumerate() {
                let neuron = layer.neuron_mut(j)?;
                let weights = Tensor::from_text_with_grad(&graph, &neuron_desc.weights, true)?;
                check_shape("Weights", i, j, neuron.weights(), &weights)?;
                let biases = Tensor::from_text_with_grad(&graph, &neuron_desc.biases, true)?;
                check_shape("Biases", i, j, neuron.biases(), &biases)?;
                neuron.set_weights(weights);
                neuron.set_biases(biases);
            }
        }
        log.log_event("已从模型记录恢复网络参数");
        Ok(network)
    }

    /// 保存为 JSON 模型文件
    pub fn save_model<P: AsRef<Path>>(&self, path: P, log: &mut EventLog) -> Result<(), ModelIoError> {
        let path = path.as_ref();
        let json = self.describe()?.to_json()?;
        std::fs::write(path, json)?;
        log.log_event(format!("模型已保存到 {}", path.display()));
        Ok(())
    }

    /// 从 JSON 模型文件加载网络
    pub fn load_model<P: AsRef<Path>>(path: P, log: &mut EventLog) -> Result<Self, ModelIoError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let descriptor = NetworkDescriptor::from_json(&json)?;
        let network = Self::from_descriptor(&descriptor, log)?;
        log.log_event(format!("已从 {} 加载模型", path.display()));
        Ok(network)
    }
}

/// 记录中的参数必须与按层大小新建的参数形状一致（权重1x上一层大小，偏置1x1）
fn check_shape(
    field: &str,
    layer: usize,
    index: usize,
    built: Option<&Tensor>,
    loaded: &Tensor,
) -> Result<(), ModelIoError> {
    let expected = built.map(Tensor::shape);
    if expected != Some(loaded.shape()) {
        return Err(ModelIoError::Malformed(format!(
            "第{layer}层第{index}个神经元的{field}形状应为{expected:?}，记录中为{:?}",
            loaded.shape()
        )));
    }
    Ok(())
}
