/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : 标量计算图（tape）中的节点定义
 *
 * 节点分两个区域存放：
 * - 叶子区：字面量构造的节点（可训练参数、常量张量），跨多次前向传播存活；
 * - 输入区：每步新建的输入/期望值，存活到其后的第二次释放；
 * - 算子区：由算子产生的中间节点（以及图内字面常量），每次前向传播前整体释放。
 */

use std::fmt;

/// 节点在计算图中的地址
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeId {
    /// 叶子区下标
    Leaf(usize),
    /// 输入区下标 + 创建时的纪元
    Input { index: usize, epoch: u64 },
    /// 算子区下标 + 所属计算图的纪元（每次释放计算图后纪元加 1）
    Op { index: usize, epoch: u64 },
}

impl NodeId {
    /// 叶子区与输入区的节点都不是由算子产生的
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_) | Self::Input { .. })
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(index) => write!(f, "leaf#{index}"),
            Self::Input { index, epoch } => write!(f, "input#{index}@{epoch}"),
            Self::Op { index, epoch } => write!(f, "op#{index}@{epoch}"),
        }
    }
}

/// 算子节点的类型（仅用于描述与调试，梯度计算依赖构造时缓存的局部偏导）
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeType {
    /// 图内字面常量，不参与求导
    Constant,
    Add(NodeId, NodeId),
    Multiply(NodeId, NodeId),
    Power(NodeId, i32),
    Exp(NodeId),
    Ln(NodeId),
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant => write!(f, "Constant"),
            Self::Add(a, b) => write!(f, "Add({a}, {b})"),
            Self::Multiply(a, b) => write!(f, "Multiply({a}, {b})"),
            Self::Power(a, n) => write!(f, "Power({a}, {n})"),
            Self::Exp(a) => write!(f, "Exp({a})"),
            Self::Ln(a) => write!(f, "Ln({a})"),
        }
    }
}

/// 叶子节点：值会被梯度下降原地修改
#[derive(Debug, Clone)]
pub(in crate::nn) struct LeafNode {
    pub(in crate::nn) value: f64,
    /// 梯度累加器：多条路径的贡献只求和，不覆盖
    pub(in crate::nn) grad: f64,
    pub(in crate::nn) requires_grad: bool,
}

impl LeafNode {
    pub(in crate::nn) const fn new(value: f64, requires_grad: bool) -> Self {
        Self {
            value,
            grad: 0.0,
            requires_grad,
        }
    }
}

/// 算子节点：构造后值不再变化
#[derive(Debug, Clone)]
pub(in crate::nn) struct OpNode {
    pub(in crate::nn) node_type: NodeType,
    pub(in crate::nn) value: f64,
    /// 历次反向传播流经本节点的梯度之和（仅供查看）
    pub(in crate::nn) grad: f64,
    pub(in crate::nn) requires_grad: bool,
    /// (父节点, 本节点对该父节点的局部偏导)，只记录需要求导的父节点
    pub(in crate::nn) parents: Vec<(NodeId, f64)>,
}
