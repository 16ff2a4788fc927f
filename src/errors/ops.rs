use std::fmt::{self, Display};

/// 张量的二元（及多元）运算符，用于错误信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// 线性组合：逐元素相乘求和再加偏置
    DotSum,
    /// 逐元素比较（损失函数中的期望值与激活值）
    ElementWise,
}
impl Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operation_name = match self {
            Operator::DotSum => "点积和",
            Operator::ElementWise => "逐元素运算",
        };
        write!(f, "{}", operation_name)
    }
}

/// 比较运算符（参数校验中要求"值 ≥ 阈值"）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    GreaterOrEqual,
}
impl Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonOperator::GreaterOrEqual => write!(f, "≥"),
        }
    }
}
