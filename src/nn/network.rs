/*
 * @Author       : 老董
 * @Date         : 2026-03-08
 * @Description  : 网络（Network）：有序的层集合
 *
 * 负责拓扑构建（相邻层全连接、参数初始化）、前向传播、损失计算与求导、参数更新。
 * 第0层只保存外部输入（作为激活数据），从不执行 combine/activate，也不持有参数。
 */

use super::event::EventLog;
use super::layer::Layer;
use super::neuron::NeuronId;
use super::ops::{ActivateFn, CombineFn, Loss, LossFunction, ReceiveFn, Softmax, Tanh};
use super::var::Init;
use super::{Graph, GraphError};
use crate::tensor::Tensor;

pub struct Network {
    graph: Graph,
    layers: Vec<Layer>,
}

impl Default for Network {
    fn default() -> Self {
        Self::new()
    }
}

impl Network {
    // ========== 创建 ==========

    pub fn new() -> Self {
        Self::with_graph(Graph::new())
    }

    /// 创建带固定种子的网络（参数初始化可重复）
    pub fn with_seed(seed: u64) -> Self {
        Self::with_graph(Graph::new_with_seed(seed))
    }

    pub const fn with_graph(graph: Graph) -> Self {
        Self {
            graph,
            layers: Vec::new(),
        }
    }

    /// 多层感知机：除最后一层用 softmax 外，其余层用 tanh；
    /// 接收均为行拼接，组合均为线性，随后全连接并初始化参数
    pub fn build(sizes: &[usize], log: &mut EventLog) -> Result<Self, GraphError> {
        Self::build_in(Graph::new(), sizes, log)
    }

    pub fn build_with_seed(
        sizes: &[usize],
        seed: u64,
        log: &mut EventLog,
    ) -> Result<Self, GraphError> {
        Self::build_in(Graph::new_with_seed(seed), sizes, log)
    }

    fn build_in(graph: Graph, sizes: &[usize], log: &mut EventLog) -> Result<Self, GraphError> {
        if sizes.is_empty() || sizes.contains(&0) {
            return Err(GraphError::InvalidOperation(format!(
                "各层神经元数量必须为正，且至少有一层：{sizes:?}"
            )));
        }
        let mut network = Self::with_graph(graph);
        let last = sizes.len() - 1;
        for (i, &size) in sizes.iter().enumerate() {
            let activate_fn: ActivateFn = if i == last {
                Softmax.into()
            } else {
                Tanh.into()
            };
            let layer = Layer::new(size, ReceiveFn::RowAppend, CombineFn::Linear, activate_fn);
            network.add_layer(layer, log);
        }
        network.connect_fully(true, log)?;
        Ok(network)
    }

    // ========== 访问器 ==========

    pub const fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn size(&self) -> usize {
        self.layers.len()
    }

    pub fn layer(&self, index: usize) -> Result<&Layer, GraphError> {
        let count = self.size();
        self.layers
            .get(index)
            .ok_or_else(|| missing_layer(index, count))
    }

    pub fn layer_mut(&mut self, index: usize) -> Result<&mut Layer, GraphError> {
        let count = self.size();
        self.layers
            .get_mut(index)
            .ok_or_else(|| missing_layer(index, count))
    }

    pub fn output_layer(&self) -> Result<&Layer, GraphError> {
        self.layers
            .last()
            .ok_or_else(|| GraphError::InvalidOperation("网络中没有任何层".to_string()))
    }

    // ========== 拓扑 ==========

    /// 在末尾追加一层
    pub fn add_layer(&mut self, layer: Layer, log: &mut EventLog) {
        log.log_event(format!("向网络添加了含{}个神经元的层", layer.size()));
        self.layers.push(layer);
    }

    /// 在`index`处插入一层；由于其后各层的下标改变，所有上下游边被清空，需重新连接
    pub fn insert_layer(
        &mut self,
        index: usize,
        layer: Layer,
        log: &mut EventLog,
    ) -> Result<(), GraphError> {
        if index > self.size() {
            return Err(missing_layer(index, self.size()));
        }
        log.log_event(format!("向网络第{index}层处插入了含{}个神经元的层", layer.size()));
        self.layers.insert(index, layer);
        self.clear_edges();
        Ok(())
    }

    /// 相邻层之间全连接：先清空所有上下游边再重建；
    /// `reset_parameters`为真时，为第1层起的每个神经元重新生成 Xavier 参数
    pub fn connect_fully(
        &mut self,
        reset_parameters: bool,
        log: &mut EventLog,
    ) -> Result<(), GraphError> {
        self.connect_fully_with(reset_parameters.then_some(Init::Xavier), log)
    }

    /// 同`connect_fully`，但可指定参数初始化策略（None 表示保留现有参数）
    pub fn connect_fully_with(
        &mut self,
        init: Option<Init>,
        log: &mut EventLog,
    ) -> Result<(), GraphError> {
        self.clear_edges();
        for i in 1..self.layers.len() {
            let (before, rest) = self.layers.split_at_mut(i);
            let previous = &mut before[i - 1];
            let current = &mut rest[0];
            let fan_in = previous.size();

            for (m, neuron) in current.neurons_mut().enumerate() {
                for (n, upstream) in previous.neurons_mut().enumerate() {
                    neuron.add_upstream(NeuronId::new(i - 1, n));
                    upstream.add_downstream(NeuronId::new(i, m));
                }
                if let Some(init) = init {
                    neuron.set_weights(init.generate(&self.graph, 1, fan_in)?);
                    neuron.set_biases(init.generate(&self.graph, 1, 1)?);
                }
            }
        }
        if init.is_some() {
            log.log_event("神经元重新连接，参数已重置");
        }
        Ok(())
    }

    /// 自定义连接：`from`成为`to`的上游；`from`必须位于更靠前的层
    pub fn connect(&mut self, from: NeuronId, to: NeuronId) -> Result<(), GraphError> {
        if from.layer >= to.layer {
            return Err(GraphError::InvalidOperation(format!(
                "上游神经元{from}必须位于下游神经元{to}之前的层"
            )));
        }
        // 先校验两端都存在，再修改，避免只连上一半
        self.layer(from.layer)?.neuron(from.index)?;
        self.layer(to.layer)?.neuron(to.index)?;
        self.layers[to.layer].neuron_mut(to.index)?.add_upstream(from);
        self.layers[from.layer]
            .neuron_mut(from.index)?
            .add_downstream(to);
        Ok(())
    }

    fn clear_edges(&mut self) {
        for layer in &mut self.layers {
            for neuron in layer.neurons_mut() {
                neuron.clear_edges();
            }
        }
    }

    // ========== 前向 / 反向 ==========

    /// 前向传播：释放上一轮的计算图，把`input[i]`作为第0层第i个神经元的激活数据，
    /// 然后依次对之后的每一层执行 receive → combine → activate
    ///
    /// 输入必须属于本网络的计算图，且在释放后仍然有效：
    /// 参数、输入节点可以，上一轮的算子结果或图内常量不行（返回`StaleNode`）。
    pub fn fire(&mut self, input: &[Tensor]) -> Result<(), GraphError> {
        let input_size = self
            .layers
            .first()
            .ok_or_else(|| GraphError::InvalidOperation("网络中没有任何层".to_string()))?
            .size();
        if input.len() != input_size {
            return Err(GraphError::InputLengthMismatch {
                expected: input_size,
                got: input.len(),
            });
        }

        self.graph.release_graph();
        for layer in &mut self.layers {
            layer.clear_phase_data();
        }
        for var in input.iter().flat_map(Tensor::iter) {
            if !self.graph.same_graph(&var.graph()) {
                return Err(GraphError::InvalidOperation(format!(
                    "输入节点{}不属于本网络的计算图",
                    var.node_id()
                )));
            }
            self.graph.inner().check_node(var.node_id())?;
        }

        for (neuron, data) in self.layers[0].neurons_mut().zip(input) {
            neuron.set_activate_data(data.clone());
        }
        for i in 1..self.layers.len() {
            let (before, rest) = self.layers.split_at_mut(i);
            rest[0].fire_all(before)?;
        }
        Ok(())
    }

    /// 一次完整的训练步：前向传播 → 计算损失 → 求导 → 梯度下降
    ///
    /// 返回1x1的损失张量，在下一次`fire`之前可读取其值。
    /// 中途失败时部分参数可能已被更新，调用方需自行快照参数以便回滚。
    pub fn back_prop(
        &mut self,
        loss_fn: &Loss,
        input: &[Tensor],
        expected: &[Tensor],
        learning_rate: f64,
    ) -> Result<Tensor, GraphError> {
        self.fire(input)?;
        let loss = loss_fn.compute(self.output_layer()?, expected)?;
        loss.differentiate()?;
        self.gradient_descent(learning_rate)?;
        Ok(loss)
    }

    /// 对第1层起的每一层执行梯度下降（第0层没有参数）
    pub fn gradient_descent(&self, learning_rate: f64) -> Result<(), GraphError> {
        self.layers
            .iter()
            .skip(1)
            .try_for_each(|layer| layer.gradient_descent(learning_rate))
    }

    /// 前向传播后把输出层每个神经元的激活数据拼成文本，并记录一条事件
    pub fn output(&mut self, input: &[Tensor], log: &mut EventLog) -> Result<String, GraphError> {
        self.fire(input)?;
        let text: String = self
            .output_layer()?
            .neurons()
            .iter()
            .filter_map(|n| n.activate_data())
            .map(ToString::to_string)
            .collect();
        log.log_event(format!("网络输出：\n{text}"));
        Ok(text)
    }

    /// 记录一条输入事件（供交互层使用）
    pub fn log_input(input_text: &str, log: &mut EventLog) {
        log.log_event(format!("网络输入：{input_text}"));
    }
}

fn missing_layer(index: usize, count: usize) -> GraphError {
    GraphError::InvalidOperation(format!("网络中不存在第{index}层（共{count}层）"))
}
