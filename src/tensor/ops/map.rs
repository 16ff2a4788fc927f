use crate::nn::{GraphError, Var};
use crate::tensor::Tensor;

impl Tensor {
    /// 对每个元素应用`f`，返回同形状的新张量（用于把标量激活函数向量化）
    pub fn map(&self, f: impl FnMut(&Var) -> Var) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            cells: self.cells.iter().map(f).collect(),
        }
    }

    /// `map`的可失败版本，遇到第一个错误即返回
    pub fn try_map<E>(&self, f: impl FnMut(&Var) -> Result<Var, E>) -> Result<Self, E> {
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            cells: self.cells.iter().map(f).collect::<Result<_, E>>()?,
        })
    }

    /// 以每个元素为起点做反向传播（损失通常是1x1，此时等价于对该标量求导）
    pub fn differentiate(&self) -> Result<(), GraphError> {
        self.cells.iter().try_for_each(Var::differentiate)
    }

    /// 对每个元素执行一步梯度下降
    pub fn apply_gradient_step(&self, learning_rate: f64) -> Result<(), GraphError> {
        self.cells
            .iter()
            .try_for_each(|var| var.apply_gradient_step(learning_rate))
    }
}
