/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : GraphInner 标量计算图（arena/tape）的底层实现
 *
 * 各 impl 块分散在子模块中：
 * - core.rs: 创建、访问器、计算图释放
 * - node_builders.rs: new_*_node（各算子）
 * - backward.rs: 反向传播与梯度下降
 */

mod backward;
mod core;
mod node_builders;

use crate::nn::nodes::{LeafNode, OpNode};
use rand::rngs::StdRng;

/// 计算图的完整定义（核心实现）
///
/// 用户通常通过 `Graph` 句柄及其产生的 `Var` 使用此结构。
pub struct GraphInner {
    /// 叶子区：跨前向传播存活
    pub(in crate::nn::graph) leaves: Vec<LeafNode>,
    /// 输入区：按纪元奇偶分两格，`release_graph`时清空上上个纪元的那一格
    pub(in crate::nn::graph) inputs: [Vec<LeafNode>; 2],
    /// 算子区：按构造顺序存放，构造顺序即拓扑序
    pub(in crate::nn::graph) ops: Vec<OpNode>,
    /// 算子区的纪元，每次 `release_graph` 后递增
    pub(in crate::nn::graph) epoch: u64,
    /// 图级别的随机数生成器（用于参数初始化）
    /// None 表示使用默认的 thread_rng（非确定性）
    pub(in crate::nn::graph) rng: Option<StdRng>,
}

impl Default for GraphInner {
    fn default() -> Self {
        Self::new()
    }
}
