/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : Var - 可微标量句柄，支持算子重载和链式调用；以及参数初始化策略 Init
 */

use super::graph::{Graph, GraphInner};
use super::{GraphError, NodeId};
use crate::errors::{ComparisonOperator, TensorError};
use crate::tensor::Tensor;
use rand::Rng;
use std::cell::RefCell;
use std::ops::{Add, Mul, Neg, Sub};
use std::rc::Rc;

// ==================== Init 枚举 ====================

/// 参数初始化策略
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Init {
    /// 常数初始化
    Constant(f64),
    /// 全零
    Zeros,
    /// 全一
    Ones,
    /// Xavier 初始化：均匀分布于 ±1/sqrt(rows*cols)
    Xavier,
}

impl Init {
    /// 生成`rows`x`cols`的初始值（有种子时使用 Graph 的 RNG，否则使用 thread_rng）
    pub fn generate_values(&self, graph: &Graph, rows: usize, cols: usize) -> Vec<f64> {
        let len = rows * cols;
        match self {
            Self::Constant(v) => vec![*v; len],
            Self::Zeros => vec![0.0; len],
            Self::Ones => vec![1.0; len],
            Self::Xavier => {
                let scale = 1.0 / (len as f64).sqrt();
                let mut g = graph.inner_mut();
                match g.rng_mut() {
                    Some(rng) => xavier_values(rng, len, scale),
                    None => xavier_values(&mut rand::thread_rng(), len, scale),
                }
            }
        }
    }

    /// 生成初始化后的可训练参数张量（元素为需要求导的叶子节点）
    pub fn generate(&self, graph: &Graph, rows: usize, cols: usize) -> Result<Tensor, TensorError> {
        for (name, actual) in [("rows", rows), ("cols", cols)] {
            if actual < 1 {
                return Err(TensorError::ValueMustSatisfyComparison {
                    value_name: name.to_string(),
                    operator: ComparisonOperator::GreaterOrEqual,
                    threshold: 1,
                    actual,
                });
            }
        }
        let values = self.generate_values(graph, rows, cols);
        let cells = values
            .chunks(cols)
            .map(|row| row.iter().map(|&v| graph.leaf(v)).collect())
            .collect();
        Tensor::new(cells)
    }
}

fn xavier_values<R: Rng + ?Sized>(rng: &mut R, len: usize, scale: f64) -> Vec<f64> {
    (0..len)
        .map(|_| 2.0 * (rng.r#gen::<f64>() - 0.5) * scale)
        .collect()
}

// ==================== Var 结构 ====================

/// 可微标量句柄 - 携带图引用，支持算子重载和链式调用
///
/// # 设计原则
/// - 持有 `Rc<RefCell<GraphInner>>` 引用，节点本身存放在图的 arena 中
/// - Clone 语义（非 Copy），开销极低（Rc clone）
/// - 算子重载（`+ - *`、取负）在失败时 panic；需要错误处理时使用 `try_*` 版本
///
/// # 使用示例
/// ```ignore
/// let graph = Graph::new();
/// let x = graph.leaf(3.0);
/// let y = &x * &x;            // 算子重载
/// y.differentiate()?;          // 反向传播
/// assert_eq!(x.gradient()?, 6.0);
/// ```
#[derive(Clone)]
pub struct Var {
    /// 节点 ID
    id: NodeId,
    /// 图引用（用户不可见）
    graph: Rc<RefCell<GraphInner>>,
}

impl std::fmt::Debug for Var {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Var").field("id", &self.id).finish()
    }
}

impl Var {
    /// 创建新的 Var（内部使用）
    pub(crate) const fn new(id: NodeId, graph: Rc<RefCell<GraphInner>>) -> Self {
        Self { id, graph }
    }

    /// 获取节点 ID
    pub const fn node_id(&self) -> NodeId {
        self.id
    }

    pub const fn is_leaf(&self) -> bool {
        self.id.is_leaf()
    }

    /// 检查两个 Var 是否来自同一个 Graph
    pub fn same_graph(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.graph, &other.graph)
    }

    /// 获取 Var 所属的 Graph handle
    pub fn graph(&self) -> Graph {
        Graph::from_rc(Rc::clone(&self.graph))
    }

    // ==================== 值访问 ====================

    pub fn value(&self) -> Result<f64, GraphError> {
        self.graph.borrow().get_node_value(self.id)
    }

    /// 累加得到的梯度（叶子节点在梯度下降后归零）
    pub fn gradient(&self) -> Result<f64, GraphError> {
        self.graph.borrow().get_node_grad(self.id)
    }

    pub fn requires_grad(&self) -> Result<bool, GraphError> {
        self.graph.borrow().node_requires_grad(self.id)
    }

    /// 改写叶子节点的值
    pub fn set_value(&self, value: f64) -> Result<(), GraphError> {
        self.graph.borrow_mut().set_leaf_value(self.id, value)
    }

    // ==================== 求导与更新 ====================

    /// 以本节点为起点（种子梯度 1.0）反向传播
    pub fn differentiate(&self) -> Result<(), GraphError> {
        self.graph.borrow_mut().backward(self.id)
    }

    /// value -= rate * gradient，随后梯度归零；只作用于本节点，不递归
    pub fn apply_gradient_step(&self, learning_rate: f64) -> Result<(), GraphError> {
        self.graph
            .borrow_mut()
            .apply_gradient_step(self.id, learning_rate)
    }

    // ==================== 安全版本（返回 Result）====================

    fn binary(
        &self,
        other: &Self,
        op_name: &str,
        build: fn(&mut GraphInner, NodeId, NodeId) -> Result<NodeId, GraphError>,
    ) -> Result<Self, GraphError> {
        if !self.same_graph(other) {
            return Err(GraphError::InvalidOperation(format!(
                "不能对来自不同 Graph 的 Var 进行{op_name}"
            )));
        }
        let id = build(&mut *self.graph.borrow_mut(), self.id, other.id)?;
        Ok(Self::new(id, Rc::clone(&self.graph)))
    }

    fn unary(
        &self,
        build: impl FnOnce(&mut GraphInner, NodeId) -> Result<NodeId, GraphError>,
    ) -> Result<Self, GraphError> {
        let id = build(&mut *self.graph.borrow_mut(), self.id)?;
        Ok(Self::new(id, Rc::clone(&self.graph)))
    }

    /// 安全的加法（返回 Result）
    pub fn try_add(&self, other: &Self) -> Result<Self, GraphError> {
        self.binary(other, "加法", GraphInner::new_add_node)
    }

    /// 安全的减法：a + (-1) * b
    pub fn try_sub(&self, other: &Self) -> Result<Self, GraphError> {
        self.binary(other, "减法", GraphInner::new_sub_node)
    }

    /// 安全的乘法（返回 Result）
    pub fn try_mul(&self, other: &Self) -> Result<Self, GraphError> {
        self.binary(other, "乘法", GraphInner::new_mul_node)
    }

    /// 安全的取负：(-1) * self
    pub fn try_neg(&self) -> Result<Self, GraphError> {
        let minus_one = self.graph().constant(-1.0);
        minus_one.try_mul(self)
    }

    /// 安全的除法：a * b^(-1)；除数为 0 时返回 `GraphError::Domain`
    pub fn try_div(&self, other: &Self) -> Result<Self, GraphError> {
        let divisor = other.value()?;
        if divisor == 0.0 {
            return Err(GraphError::Domain {
                operation: "div",
                value: divisor,
            });
        }
        self.try_mul(&other.pow(-1)?)
    }

    /// 整数次幂
    pub fn pow(&self, n: i32) -> Result<Self, GraphError> {
        self.unary(|g, id| g.new_pow_node(id, n))
    }

    pub fn exp(&self) -> Result<Self, GraphError> {
        self.unary(GraphInner::new_exp_node)
    }

    /// 自然对数；值不为正时返回 `GraphError::Domain`
    pub fn ln(&self) -> Result<Self, GraphError> {
        self.unary(GraphInner::new_ln_node)
    }

    /// self * c，其中 c 是图内常量
    pub fn scale(&self, c: f64) -> Result<Self, GraphError> {
        self.graph().constant(c).try_mul(self)
    }

    /// self + c，其中 c 是图内常量
    pub fn shift(&self, c: f64) -> Result<Self, GraphError> {
        self.try_add(&self.graph().constant(c))
    }
}

// ==================== 算子重载 ====================

impl Add for &Var {
    type Output = Var;

    fn add(self, other: &Var) -> Var {
        self.try_add(other).expect("Var 加法失败")
    }
}

impl Add for Var {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        &self + &other
    }
}

impl Add<Var> for &Var {
    type Output = Var;

    fn add(self, other: Var) -> Var {
        self + &other
    }
}

impl Add<&Self> for Var {
    type Output = Self;

    fn add(self, other: &Self) -> Self {
        &self + other
    }
}

// Sub（实现为 self + (-1 * other)）
impl Sub for &Var {
    type Output = Var;

    fn sub(self, other: &Var) -> Var {
        self.try_sub(other).expect("Var 减法失败")
    }
}

impl Sub for Var {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        &self - &other
    }
}

impl Sub<Var> for &Var {
    type Output = Var;

    fn sub(self, other: Var) -> Var {
        self - &other
    }
}

impl Sub<&Self> for Var {
    type Output = Self;

    fn sub(self, other: &Self) -> Self {
        &self - other
    }
}

impl Mul for &Var {
    type Output = Var;

    fn mul(self, other: &Var) -> Var {
        self.try_mul(other).expect("Var 乘法失败")
    }
}

impl Mul for Var {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        &self * &other
    }
}

impl Mul<Var> for &Var {
    type Output = Var;

    fn mul(self, other: Var) -> Var {
        self * &other
    }
}

impl Mul<&Self> for Var {
    type Output = Self;

    fn mul(self, other: &Self) -> Self {
        &self * other
    }
}

impl Neg for &Var {
    type Output = Var;

    fn neg(self) -> Var {
        self.try_neg().expect("Var 取负失败")
    }
}

impl Neg for Var {
    type Output = Self;

    fn neg(self) -> Self {
        -&self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_constant_values() {
        let graph = Graph::new();
        assert_eq!(Init::Zeros.generate_values(&graph, 2, 3), vec![0.0; 6]);
        assert_eq!(Init::Ones.generate_values(&graph, 1, 2), vec![1.0; 2]);
        assert_eq!(Init::Constant(0.5).generate_values(&graph, 1, 1), vec![0.5]);
    }

    #[test]
    fn test_init_xavier_range() {
        let graph = Graph::new();
        let values = Init::Xavier.generate_values(&graph, 1, 16);
        // Xavier: |v| <= 1/sqrt(1*16) = 0.25
        assert_eq!(values.len(), 16);
        assert!(values.iter().all(|v| v.abs() <= 0.25));
    }

    #[test]
    fn test_init_xavier_seeded_is_reproducible() {
        let a = Init::Xavier.generate_values(&Graph::new_with_seed(7), 3, 4);
        let b = Init::Xavier.generate_values(&Graph::new_with_seed(7), 3, 4);
        assert_eq!(a, b);
    }

    #[test]
    fn test_init_generate_rejects_empty_shape() {
        let graph = Graph::new();
        assert_eq!(
            Init::Xavier.generate(&graph, 1, 0).unwrap_err(),
            TensorError::ValueMustSatisfyComparison {
                value_name: "cols".to_string(),
                operator: ComparisonOperator::GreaterOrEqual,
                threshold: 1,
                actual: 0,
            }
        );
    }

    #[test]
    fn test_init_generate_creates_trainable_leaves() {
        let graph = Graph::new();
        let tensor = Init::Ones.generate(&graph, 2, 2).unwrap();
        assert_eq!(tensor.shape(), [2, 2]);
        for var in tensor.iter() {
            assert!(var.is_leaf());
            assert!(var.requires_grad().unwrap());
        }
    }
}
