/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : Graph 句柄（用户级 API）
 */

use super::inner::GraphInner;
use crate::nn::NodeId;
use crate::nn::var::Var;
use std::cell::RefCell;
use std::rc::Rc;

/// Graph - 计算图句柄
///
/// # 设计原则
/// - 是 `Rc<RefCell<GraphInner>>` 的薄封装
/// - Clone 语义：多个 Graph 引用同一个 GraphInner
/// - 创建的 Var 自动持有图引用
#[derive(Clone)]
pub struct Graph {
    inner: Rc<RefCell<GraphInner>>,
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let g = self.inner.borrow();
        f.debug_struct("Graph")
            .field("leaves", &g.leaves_count())
            .field("ops", &g.ops_count())
            .field("epoch", &g.epoch())
            .finish()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    // ==================== 创建 ====================

    /// 创建新图
    pub fn new() -> Self {
        Self::from_inner(GraphInner::new())
    }

    /// 创建带种子的图（用于确定性的参数初始化）
    pub fn new_with_seed(seed: u64) -> Self {
        Self::from_inner(GraphInner::new_with_seed(seed))
    }

    /// 从现有 GraphInner 创建句柄
    pub fn from_inner(inner: GraphInner) -> Self {
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    pub(crate) const fn from_rc(inner: Rc<RefCell<GraphInner>>) -> Self {
        Self { inner }
    }

    /// 获取内部 GraphInner 的不可变引用
    pub fn inner(&self) -> std::cell::Ref<'_, GraphInner> {
        self.inner.borrow()
    }

    /// 获取内部 GraphInner 的可变引用
    pub fn inner_mut(&self) -> std::cell::RefMut<'_, GraphInner> {
        self.inner.borrow_mut()
    }

    /// 将 NodeId 包装成 Var
    pub fn wrap_node_id(&self, node_id: NodeId) -> Var {
        Var::new(node_id, Rc::clone(&self.inner))
    }

    /// 两个句柄是否指向同一个图
    pub fn same_graph(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    // ==================== 创建变量 ====================

    /// 创建叶子节点（默认需要求导，即可训练参数）
    pub fn leaf(&self, value: f64) -> Var {
        self.leaf_with_grad(value, true)
    }

    /// 创建叶子节点，并指定是否需要求导
    pub fn leaf_with_grad(&self, value: f64, requires_grad: bool) -> Var {
        let id = self.inner.borrow_mut().new_leaf_node(value, requires_grad);
        self.wrap_node_id(id)
    }

    /// 创建输入节点（不参与求导）：在创建后的第二次 `release_graph` 时回收
    ///
    /// 适合每步都新建的输入与期望值，避免它们在叶子区中无限堆积。
    pub fn input(&self, value: f64) -> Var {
        let id = self.inner.borrow_mut().new_input_node(value);
        self.wrap_node_id(id)
    }

    /// 创建图内常量：随 `release_graph` 一起释放
    pub fn constant(&self, value: f64) -> Var {
        let id = self.inner.borrow_mut().new_constant_node(value);
        self.wrap_node_id(id)
    }

    // ==================== 生命周期 ====================

    /// 释放本轮前向传播构建的计算图（叶子节点保留）
    pub fn release_graph(&self) {
        self.inner.borrow_mut().release_graph();
    }

    /// 清零所有节点的梯度
    pub fn zero_grad(&self) {
        self.inner.borrow_mut().zero_grad();
    }

    pub fn set_seed(&self, seed: u64) {
        self.inner.borrow_mut().set_seed(seed);
    }
}
