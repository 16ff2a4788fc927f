use crate::errors::{Operator, TensorError};
use crate::nn::{GraphError, Var};
use crate::tensor::Tensor;

impl Tensor {
    /// 按行优先展平为1x(rows*cols)的行张量
    pub fn flatten(&self) -> Self {
        Self {
            rows: 1,
            cols: self.size(),
            cells: self.cells.clone(),
        }
    }

    /// 按给定顺序把各张量展平后首尾相接，得到一个1xN的行张量
    pub fn row_append(sources: &[&Self]) -> Result<Self, TensorError> {
        let cells: Vec<Var> = sources
            .iter()
            .flat_map(|t| t.cells.iter().cloned())
            .collect();
        if cells.is_empty() {
            return Err(TensorError::EmptyList);
        }
        Ok(Self {
            rows: 1,
            cols: cells.len(),
            cells,
        })
    }

    /// 带偏置的点积：sum(inputs[r,c] * weights[r,c]) + biases[0,0]，结果为1x1张量
    ///
    /// `inputs`与`weights`形状必须相同，`biases`必须是1x1。
    pub fn combine_linear(inputs: &Self, weights: &Self, biases: &Self) -> Result<Self, GraphError> {
        if inputs.shape() != weights.shape() {
            return Err(TensorError::OperatorError {
                operator: Operator::DotSum,
                tensor1_shape: inputs.shape().to_vec(),
                tensor2_shape: weights.shape().to_vec(),
            }
            .into());
        }
        if biases.shape() != [1, 1] {
            return Err(TensorError::OperatorError {
                operator: Operator::DotSum,
                tensor1_shape: vec![1, 1],
                tensor2_shape: biases.shape().to_vec(),
            }
            .into());
        }

        let mut sum: Option<Var> = None;
        for (x, w) in inputs.cells.iter().zip(&weights.cells) {
            let product = x.try_mul(w)?;
            sum = Some(match sum {
                Some(acc) => product.try_add(&acc)?,
                None => product,
            });
        }
        // inputs 至少有一个元素，sum 必然存在
        let dot = sum.ok_or(TensorError::EmptyList)?;
        Ok(Self::from_scalar(dot.try_add(&biases.cells[0])?))
    }
}
