/*
 * @Author       : 老董
 * @Date         : 2026-03-09
 * @Description  : 网络描述符（Network Descriptor）
 *                 训练后网络的可序列化记录：各层大小 + 每个神经元的参数文本
 */

use serde::{Deserialize, Serialize};

/// 网络的可序列化描述
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NetworkDescriptor {
    #[serde(rename = "Layers")]
    pub layers: Vec<LayerDescriptor>,
}

/// 层描述
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayerDescriptor {
    pub size: usize,
    #[serde(rename = "Neurons")]
    pub neurons: Vec<NeuronDescriptor>,
}

/// 神经元参数（行括号文本；输入层为空字符串）
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NeuronDescriptor {
    #[serde(rename = "Weights")]
    pub weights: String,
    #[serde(rename = "Biases")]
    pub biases: String,
}

impl NetworkDescriptor {
    /// 各层神经元数量
    pub fn sizes(&self) -> Vec<usize> {
        self.layers.iter().map(|l| l.size).collect()
    }

    /// 序列化为 JSON 字符串（带缩进）
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl NeuronDescriptor {
    pub fn new(weights: impl Into<String>, biases: impl Into<String>) -> Self {
        Self {
            weights: weights.into(),
            biases: biases.into(),
        }
    }

    /// 输入层神经元的占位描述
    pub fn empty() -> Self {
        Self::default()
    }
}
