use crate::errors::TensorError;
use crate::nn::{Graph, GraphError, Var};

mod ops {
    pub mod combine;
    pub mod map;
}

mod print;
mod text;

#[cfg(test)]
mod tests;

/// 定义张量的结构体：由标量节点（`Var`）组成的二维矩形网格。
/// 注：张量只是容器，其元素共享（而非拥有）计算图中的节点；
/// 形状在构造后不可变，但可以原地替换某个元素。
#[derive(Debug, Clone)]
pub struct Tensor {
    rows: usize,
    cols: usize,
    /// 按行优先存放
    cells: Vec<Var>,
}

impl Tensor {
    /// 由二维网格创建张量。网格不能为空，且每一行的元素个数必须相同。
    pub fn new(cells: Vec<Vec<Var>>) -> Result<Self, TensorError> {
        let rows = cells.len();
        let cols = cells.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(TensorError::EmptyList);
        }
        if cells.iter().any(|row| row.len() != cols) {
            return Err(TensorError::InconsistentShape);
        }
        Ok(Self {
            rows,
            cols,
            cells: cells.into_iter().flatten().collect(),
        })
    }

    /// 由数值创建张量，每个元素都是新的叶子节点
    pub fn from_values(
        graph: &Graph,
        values: &[Vec<f64>],
        requires_grad: bool,
    ) -> Result<Self, TensorError> {
        let cells = values
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&v| graph.leaf_with_grad(v, requires_grad))
                    .collect()
            })
            .collect();
        Self::new(cells)
    }

    /// 由单个标量创建1x1张量
    pub fn from_scalar(var: Var) -> Self {
        Self {
            rows: 1,
            cols: 1,
            cells: vec![var],
        }
    }

    /// 由一行元素创建1xN张量
    pub fn from_row(row: Vec<Var>) -> Result<Self, TensorError> {
        Self::new(vec![row])
    }
}

// 访问器
impl Tensor {
    pub const fn rows(&self) -> usize {
        self.rows
    }

    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// [行数, 列数]
    pub const fn shape(&self) -> [usize; 2] {
        [self.rows, self.cols]
    }

    pub const fn size(&self) -> usize {
        self.rows * self.cols
    }

    /// 获取第`row`行第`col`列（均从0开始）的元素
    pub fn get(&self, row: usize, col: usize) -> Result<&Var, TensorError> {
        let index = self.index_of(row, col)?;
        Ok(&self.cells[index])
    }

    /// 替换第`row`行第`col`列（均从0开始）的元素
    pub fn set(&mut self, row: usize, col: usize, var: Var) -> Result<(), TensorError> {
        let index = self.index_of(row, col)?;
        self.cells[index] = var;
        Ok(())
    }

    /// 按行优先遍历所有元素
    pub fn iter(&self) -> std::slice::Iter<'_, Var> {
        self.cells.iter()
    }

    /// 按行优先返回所有元素的值
    pub fn values(&self) -> Result<Vec<f64>, GraphError> {
        self.cells.iter().map(Var::value).collect()
    }

    /// 按行返回所有元素的值
    pub fn values_2d(&self) -> Result<Vec<Vec<f64>>, GraphError> {
        let values = self.values()?;
        Ok(values.chunks(self.cols).map(<[f64]>::to_vec).collect())
    }

    /// 按行优先返回所有元素的梯度
    pub fn gradients(&self) -> Result<Vec<f64>, GraphError> {
        self.cells.iter().map(Var::gradient).collect()
    }

    /// 1x1张量的值
    pub fn item(&self) -> Result<f64, GraphError> {
        if self.shape() != [1, 1] {
            return Err(GraphError::InvalidOperation(format!(
                "张量不是标量，形状为{:?}",
                self.shape()
            )));
        }
        self.cells[0].value()
    }

    fn index_of(&self, row: usize, col: usize) -> Result<usize, TensorError> {
        if row >= self.rows || col >= self.cols {
            return Err(TensorError::IndexOutOfRange {
                row,
                col,
                shape: self.shape().to_vec(),
            });
        }
        Ok(row * self.cols + col)
    }
}

impl<'a> IntoIterator for &'a Tensor {
    type Item = &'a Var;
    type IntoIter = std::slice::Iter<'a, Var>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
