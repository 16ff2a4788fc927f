use crate::nn::{GraphError, Phase};
use crate::tensor::Tensor;

/// 接收阶段策略：从上游神经元的激活数据构造本神经元的接收数据
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReceiveFn {
    /// 按上游顺序把各激活张量展平并拼接为1xN行张量
    #[default]
    RowAppend,
}

impl ReceiveFn {
    pub fn compute(&self, upstream: &[&Tensor]) -> Result<Tensor, GraphError> {
        match self {
            Self::RowAppend => {
                if upstream.is_empty() {
                    return Err(GraphError::MissingPhaseData {
                        phase: Phase::Receive,
                        detail: "神经元没有上游神经元".to_string(),
                    });
                }
                Ok(Tensor::row_append(upstream)?)
            }
        }
    }
}
