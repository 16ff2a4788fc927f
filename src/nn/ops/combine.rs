use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 组合阶段策略：由接收数据与参数计算组合数据
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CombineFn {
    /// 带偏置的点积，需要权重与偏置
    #[default]
    Linear,
    /// 直接把接收数据作为组合数据
    Identity,
}

impl CombineFn {
    pub fn compute(
        &self,
        received: &Tensor,
        weights: Option<&Tensor>,
        biases: Option<&Tensor>,
    ) -> Result<Tensor, GraphError> {
        match self {
            Self::Linear => {
                let (Some(weights), Some(biases)) = (weights, biases) else {
                    return Err(GraphError::MissingParameters);
                };
                Tensor::combine_linear(received, weights, biases)
            }
            Self::Identity => Ok(received.clone()),
        }
    }
}
