use thiserror::Error;
mod ops;
pub use self::ops::*;

/// 张量（`Tensor`）相关的前置条件错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TensorError {
    // 张量二元运算
    #[error(
        "形状不一致，故无法{operator}：第一个张量的形状为{tensor1_shape:?}，第二个张量的形状为{tensor2_shape:?}"
    )]
    OperatorError {
        operator: Operator,
        tensor1_shape: Vec<usize>,
        tensor2_shape: Vec<usize>,
    },
    #[error("索引({row}, {col})越界：张量的形状为{shape:?}")]
    IndexOutOfRange {
        row: usize,
        col: usize,
        shape: Vec<usize>,
    },
    #[error("{value_name}须{operator}{threshold}，实际为{actual}")]
    ValueMustSatisfyComparison {
        value_name: String,
        operator: ComparisonOperator,
        threshold: usize,
        actual: usize,
    },
    #[error("张量列表为空")]
    EmptyList,
    #[error("张量形状不一致：每一行的元素个数必须相同")]
    InconsistentShape,
    #[error("无法解析文本`{0}`")]
    Parse(String),
}
