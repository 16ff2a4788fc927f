use crate::nn::{GraphError, Var};
use crate::tensor::Tensor;
use enum_dispatch::enum_dispatch;

/// 激活阶段策略的统一接口
#[enum_dispatch]
pub trait Activate {
    /// 由本神经元的组合数据（以及同层其它神经元的组合数据）计算激活数据
    fn activate(&self, combined: &Tensor, adjacent: &[&Tensor]) -> Result<Tensor, GraphError>;

    /// 是否需要读取同层其它神经元的组合数据
    fn reads_adjacent(&self) -> bool {
        false
    }
}

/// 激活阶段策略
#[enum_dispatch(Activate)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivateFn {
    Identity,
    Tanh,
    Sigmoid,
    Softmax,
}

impl Default for ActivateFn {
    fn default() -> Self {
        Tanh.into()
    }
}

/// 恒等：激活数据即组合数据
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Identity;

impl Activate for Identity {
    fn activate(&self, combined: &Tensor, _adjacent: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(combined.clone())
    }
}

/// 双曲正切，逐元素作用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tanh;

impl Activate for Tanh {
    fn activate(&self, combined: &Tensor, _adjacent: &[&Tensor]) -> Result<Tensor, GraphError> {
        combined.try_map(tanh)
    }
}

/// 逻辑斯蒂 sigmoid，逐元素作用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sigmoid;

impl Activate for Sigmoid {
    fn activate(&self, combined: &Tensor, _adjacent: &[&Tensor]) -> Result<Tensor, GraphError> {
        combined.try_map(sigmoid)
    }
}

/// Softmax：在本神经元与同层所有其它神经元的组合数据上归一化
/// activate[i] = exp(combine[i]) / Σ_j exp(combine[j])
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Softmax;

impl Activate for Softmax {
    fn activate(&self, combined: &Tensor, adjacent: &[&Tensor]) -> Result<Tensor, GraphError> {
        let own = combined.try_map(Var::exp)?;

        let mut sum: Option<Var> = None;
        let adjacent_exps = adjacent
            .iter()
            .map(|t| t.try_map(Var::exp))
            .collect::<Result<Vec<_>, _>>()?;
        for var in own.iter().chain(adjacent_exps.iter().flat_map(Tensor::iter)) {
            sum = Some(match sum {
                Some(acc) => var.try_add(&acc)?,
                None => var.clone(),
            });
        }
        let inverse = match sum {
            Some(sum) => sum.pow(-1)?,
            None => {
                return Err(GraphError::InvalidOperation(
                    "softmax 的输入为空".to_string(),
                ));
            }
        };

        own.try_map(|e| e.try_mul(&inverse))
    }

    fn reads_adjacent(&self) -> bool {
        true
    }
}

/// tanh(x) = (e^{2x} - 1) * (e^{2x} + 1)^{-1}
pub fn tanh(x: &Var) -> Result<Var, GraphError> {
    let e2x = x.scale(2.0)?.exp()?;
    let numerator = e2x.shift(-1.0)?;
    let denominator = e2x.shift(1.0)?.pow(-1)?;
    numerator.try_mul(&denominator)
}

/// sigmoid(x) = (1 + e^{-x})^{-1}
pub fn sigmoid(x: &Var) -> Result<Var, GraphError> {
    x.scale(-1.0)?.exp()?.shift(1.0)?.pow(-1)
}
