/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : GraphInner 核心操作：创建、访问器、计算图释放
 */

use super::super::error::GraphError;
use super::GraphInner;
use crate::nn::NodeId;
use crate::nn::nodes::{LeafNode, NodeType, OpNode};
use rand::SeedableRng;
use rand::rngs::StdRng;

impl GraphInner {
    // ========== 创建 ==========

    pub const fn new() -> Self {
        Self {
            leaves: Vec::new(),
            inputs: [Vec::new(), Vec::new()],
            ops: Vec::new(),
            epoch: 0,
            rng: None,
        }
    }

    /// 创建一个带固定种子的计算图（确保可重复性）
    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            rng: Some(StdRng::seed_from_u64(seed)),
            ..Self::new()
        }
    }

    /// 设置/重置图的随机种子
    pub fn set_seed(&mut self, seed: u64) {
        self.rng = Some(StdRng::seed_from_u64(seed));
    }

    /// 检查图是否有固定种子
    pub const fn has_seed(&self) -> bool {
        self.rng.is_some()
    }

    pub(in crate::nn) fn rng_mut(&mut self) -> Option<&mut StdRng> {
        self.rng.as_mut()
    }

    // ========== 基础访问器 ==========

    pub fn leaves_count(&self) -> usize {
        self.leaves.len()
    }

    /// 输入区中尚未回收的节点数（最多覆盖两个纪元）
    pub fn inputs_count(&self) -> usize {
        self.inputs.iter().map(Vec::len).sum()
    }

    /// 当前纪元内的算子节点数
    pub fn ops_count(&self) -> usize {
        self.ops.len()
    }

    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    pub(in crate::nn::graph) fn get_leaf(&self, index: usize) -> Result<&LeafNode, GraphError> {
        self.leaves
            .get(index)
            .ok_or(GraphError::NodeNotFound(NodeId::Leaf(index)))
    }

    pub(in crate::nn::graph) fn get_leaf_mut(
        &mut self,
        index: usize,
    ) -> Result<&mut LeafNode, GraphError> {
        self.leaves
            .get_mut(index)
            .ok_or(GraphError::NodeNotFound(NodeId::Leaf(index)))
    }

    /// 获取输入区节点：只在创建纪元及其下一个纪元内有效
    pub(in crate::nn::graph) fn get_input(&self, id: NodeId) -> Result<&LeafNode, GraphError> {
        let index = self.input_index(id)?;
        self.inputs[index.0]
            .get(index.1)
            .ok_or(GraphError::NodeNotFound(id))
    }

    pub(in crate::nn::graph) fn get_input_mut(
        &mut self,
        id: NodeId,
    ) -> Result<&mut LeafNode, GraphError> {
        let index = self.input_index(id)?;
        self.inputs[index.0]
            .get_mut(index.1)
            .ok_or(GraphError::NodeNotFound(id))
    }

    /// (格子, 格内下标)
    fn input_index(&self, id: NodeId) -> Result<(usize, usize), GraphError> {
        match id {
            NodeId::Input { index, epoch } => {
                if epoch != self.epoch && epoch + 1 != self.epoch {
                    return Err(GraphError::StaleNode(id));
                }
                Ok(((epoch % 2) as usize, index))
            }
            _ => Err(GraphError::InvalidOperation(format!(
                "节点{id}不是输入节点"
            ))),
        }
    }

    /// 叶子区或输入区的节点
    pub(in crate::nn::graph) fn get_leaf_like(&self, id: NodeId) -> Result<&LeafNode, GraphError> {
        match id {
            NodeId::Leaf(index) => self.get_leaf(index),
            NodeId::Input { .. } => self.get_input(id),
            NodeId::Op { .. } => Err(GraphError::InvalidOperation(format!(
                "节点{id}是算子节点，不是叶子节点"
            ))),
        }
    }

    pub(in crate::nn::graph) fn get_leaf_like_mut(
        &mut self,
        id: NodeId,
    ) -> Result<&mut LeafNode, GraphError> {
        match id {
            NodeId::Leaf(index) => self.get_leaf_mut(index),
            NodeId::Input { .. } => self.get_input_mut(id),
            NodeId::Op { .. } => Err(GraphError::InvalidOperation(format!(
                "节点{id}是算子节点，不是叶子节点"
            ))),
        }
    }

    /// 获取算子节点，纪元不符（计算图已释放）时报错
    pub(in crate::nn::graph) fn get_op(&self, id: NodeId) -> Result<(usize, &OpNode), GraphError> {
        match id {
            NodeId::Op { index, epoch } => {
                if epoch != self.epoch {
                    return Err(GraphError::StaleNode(id));
                }
                self.ops
                    .get(index)
                    .map(|op| (index, op))
                    .ok_or(GraphError::NodeNotFound(id))
            }
            _ => Err(GraphError::InvalidOperation(format!(
                "节点{id}是叶子节点，不是算子节点"
            ))),
        }
    }

    /// 校验节点仍然有效（存在且未随释放而失效）
    pub fn check_node(&self, id: NodeId) -> Result<(), GraphError> {
        match id {
            NodeId::Op { .. } => self.get_op(id).map(|_| ()),
            _ => self.get_leaf_like(id).map(|_| ()),
        }
    }

    pub fn get_node_value(&self, id: NodeId) -> Result<f64, GraphError> {
        match id {
            NodeId::Op { .. } => Ok(self.get_op(id)?.1.value),
            _ => Ok(self.get_leaf_like(id)?.value),
        }
    }

    pub fn get_node_grad(&self, id: NodeId) -> Result<f64, GraphError> {
        match id {
            NodeId::Op { .. } => Ok(self.get_op(id)?.1.grad),
            _ => Ok(self.get_leaf_like(id)?.grad),
        }
    }

    pub fn node_requires_grad(&self, id: NodeId) -> Result<bool, GraphError> {
        match id {
            NodeId::Op { .. } => Ok(self.get_op(id)?.1.requires_grad),
            _ => Ok(self.get_leaf_like(id)?.requires_grad),
        }
    }

    pub fn get_node_type(&self, id: NodeId) -> Result<Option<NodeType>, GraphError> {
        match id {
            NodeId::Op { .. } => Ok(Some(self.get_op(id)?.1.node_type)),
            _ => self.get_leaf_like(id).map(|_| None),
        }
    }

    /// 直接改写叶子节点（含输入节点）的值（不影响其梯度）
    pub fn set_leaf_value(&mut self, id: NodeId, value: f64) -> Result<(), GraphError> {
        match id {
            NodeId::Op { .. } => Err(GraphError::InvalidOperation(format!(
                "节点{id}的值只能通过前向传播计算得到，不能直接设置"
            ))),
            _ => {
                self.get_leaf_like_mut(id)?.value = value;
                Ok(())
            }
        }
    }

    // ========== 计算图生命周期 ==========

    /// 释放本轮前向传播产生的所有算子节点，叶子节点保留
    ///
    /// 释放后，指向旧算子节点的 `NodeId` 再被访问时会返回 `GraphError::StaleNode`。
    /// 输入节点多存活一个纪元：释放前创建的输入仍可用于紧随其后的前向传播，
    /// 再往前的输入在此回收。
    pub fn release_graph(&mut self) {
        self.ops.clear();
        self.epoch += 1;
        self.inputs[(self.epoch % 2) as usize].clear();
    }

    pub(in crate::nn::graph) const fn current_input_id(&self, index: usize) -> NodeId {
        NodeId::Input {
            index,
            epoch: self.epoch,
        }
    }

    pub(in crate::nn::graph) const fn current_op_id(&self, index: usize) -> NodeId {
        NodeId::Op {
            index,
            epoch: self.epoch,
        }
    }
}
