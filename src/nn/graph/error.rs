/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : Graph 模块（标量自动微分 + 神经元网络）的错误类型
 */

use crate::errors::TensorError;
use crate::nn::NodeId;
use thiserror::Error;

/// 神经元的三个阶段，用于错误提示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Receive,
    Combine,
    Activate,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Receive => "receive",
            Self::Combine => "combine",
            Self::Activate => "activate",
        };
        write!(f, "{name}")
    }
}

/// Graph 操作错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("节点{0:?}不存在")]
    NodeNotFound(NodeId),
    /// 节点所属的计算图已被释放（新一轮前向传播开始）
    #[error("节点{0:?}所在的计算图已被释放，请重新执行前向传播")]
    StaleNode(NodeId),
    #[error("{0}")]
    InvalidOperation(String),
    /// 数值定义域错误，如对非正数取对数
    #[error("{operation}的定义域错误：输入值为{value}")]
    Domain { operation: &'static str, value: f64 },
    /// 阶段所需的输入张量不存在（流水线未初始化）
    #[error("{phase}阶段缺少输入数据：{detail}")]
    MissingPhaseData { phase: Phase, detail: String },
    #[error("神经元缺少权重或偏置")]
    MissingParameters,
    #[error("输入数量({got})与第0层神经元数量({expected})不一致")]
    InputLengthMismatch { expected: usize, got: usize },
    #[error(transparent)]
    Tensor(#[from] TensorError),
}
