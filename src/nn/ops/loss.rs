use crate::errors::{Operator, TensorError};
use crate::nn::{GraphError, Layer, Phase, Var};
use crate::tensor::Tensor;
use enum_dispatch::enum_dispatch;

/// 损失函数接口：比较输出层的激活数据与期望值，返回1x1的损失张量
#[enum_dispatch]
pub trait LossFunction {
    fn compute(&self, layer: &Layer, expected: &[Tensor]) -> Result<Tensor, GraphError>;
}

/// 损失函数
#[enum_dispatch(LossFunction)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loss {
    CrossEntropy,
    SquaredError,
    BinaryCrossEntropy,
}

impl Default for Loss {
    fn default() -> Self {
        CrossEntropy.into()
    }
}

/// 交叉熵：-Σ y·ln(a)，对输出层所有神经元的所有元素求和
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CrossEntropy;

impl LossFunction for CrossEntropy {
    fn compute(&self, layer: &Layer, expected: &[Tensor]) -> Result<Tensor, GraphError> {
        let sum = sum_over_pairs(layer, expected, |a, y| y.try_mul(&a.ln()?))?;
        Ok(Tensor::from_scalar(sum.try_neg()?))
    }
}

/// 平方误差：Σ (y - a)²
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SquaredError;

impl LossFunction for SquaredError {
    fn compute(&self, layer: &Layer, expected: &[Tensor]) -> Result<Tensor, GraphError> {
        let sum = sum_over_pairs(layer, expected, |a, y| y.try_sub(a)?.pow(2))?;
        Ok(Tensor::from_scalar(sum))
    }
}

/// 二元交叉熵：-Σ [y·ln(a) + (1-y)·ln(1-a)]，激活值须落在(0, 1)内
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BinaryCrossEntropy;

impl LossFunction for BinaryCrossEntropy {
    fn compute(&self, layer: &Layer, expected: &[Tensor]) -> Result<Tensor, GraphError> {
        let sum = sum_over_pairs(layer, expected, |a, y| {
            let positive = y.try_mul(&a.ln()?)?;
            let one_minus_y = y.scale(-1.0)?.shift(1.0)?;
            let one_minus_a = a.scale(-1.0)?.shift(1.0)?;
            let negative = one_minus_y.try_mul(&one_minus_a.ln()?)?;
            positive.try_add(&negative)
        })?;
        Ok(Tensor::from_scalar(sum.try_neg()?))
    }
}

/// 对输出层每个神经元的每个元素（激活值 a，期望值 y）计算`term`并求和
fn sum_over_pairs(
    layer: &Layer,
    expected: &[Tensor],
    mut term: impl FnMut(&Var, &Var) -> Result<Var, GraphError>,
) -> Result<Var, GraphError> {
    if expected.len() != layer.size() {
        return Err(GraphError::InvalidOperation(format!(
            "期望值数量({})与输出层神经元数量({})不一致",
            expected.len(),
            layer.size()
        )));
    }

    let mut sum: Option<Var> = None;
    for (index, (neuron, y)) in layer.neurons().iter().zip(expected).enumerate() {
        let activated = neuron
            .activate_data()
            .ok_or_else(|| GraphError::MissingPhaseData {
                phase: Phase::Activate,
                detail: format!("输出层第{index}个神经元尚未计算激活数据"),
            })?;
        if activated.shape() != y.shape() {
            return Err(TensorError::OperatorError {
                operator: Operator::ElementWise,
                tensor1_shape: activated.shape().to_vec(),
                tensor2_shape: y.shape().to_vec(),
            }
            .into());
        }
        for (a, y) in activated.iter().zip(y) {
            let value = term(a, y)?;
            sum = Some(match sum {
                Some(acc) => value.try_add(&acc)?,
                None => value,
            });
        }
    }

    sum.ok_or_else(|| GraphError::InvalidOperation("输出层为空，无法计算损失".to_string()))
}
