/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : GraphInner 节点构建：叶子、常量与各算子
 *
 * 所有算子都是纯函数：只产生新节点，从不修改操作数的值。
 * 新节点是否需要求导 = 任一操作数需要求导；
 * 不需要求导的操作数不会被记录为父节点，反向传播自然不会流向它（短路）。
 */

use super::super::error::GraphError;
use super::GraphInner;
use crate::nn::NodeId;
use crate::nn::nodes::{LeafNode, NodeType, OpNode};

impl GraphInner {
    /// 新建叶子节点（可训练参数或常量张量中的元素）
    pub fn new_leaf_node(&mut self, value: f64, requires_grad: bool) -> NodeId {
        self.leaves.push(LeafNode::new(value, requires_grad));
        NodeId::Leaf(self.leaves.len() - 1)
    }

    /// 新建输入节点（不参与求导），存活到其后的第二次`release_graph`
    pub fn new_input_node(&mut self, value: f64) -> NodeId {
        let slot = &mut self.inputs[(self.epoch % 2) as usize];
        slot.push(LeafNode::new(value, false));
        let index = slot.len() - 1;
        self.current_input_id(index)
    }

    /// 新建图内常量（随计算图一起释放，不参与求导）
    pub fn new_constant_node(&mut self, value: f64) -> NodeId {
        self.push_op(NodeType::Constant, value, Vec::new(), false)
    }

    pub fn new_add_node(&mut self, a: NodeId, b: NodeId) -> Result<NodeId, GraphError> {
        let (a_value, a_grad) = self.operand(a)?;
        let (b_value, b_grad) = self.operand(b)?;
        let mut parents = Vec::with_capacity(2);
        if a_grad {
            parents.push((a, 1.0));
        }
        if b_grad {
            parents.push((b, 1.0));
        }
        Ok(self.push_op(
            NodeType::Add(a, b),
            a_value + b_value,
            parents,
            a_grad || b_grad,
        ))
    }

    pub fn new_mul_node(&mut self, a: NodeId, b: NodeId) -> Result<NodeId, GraphError> {
        let (a_value, a_grad) = self.operand(a)?;
        let (b_value, b_grad) = self.operand(b)?;
        let mut parents = Vec::with_capacity(2);
        if a_grad {
            parents.push((a, b_value));
        }
        if b_grad {
            parents.push((b, a_value));
        }
        Ok(self.push_op(
            NodeType::Multiply(a, b),
            a_value * b_value,
            parents,
            a_grad || b_grad,
        ))
    }

    /// a - b，实现为 a + (-1) * b
    pub fn new_sub_node(&mut self, a: NodeId, b: NodeId) -> Result<NodeId, GraphError> {
        let minus_one = self.new_constant_node(-1.0);
        let negated = self.new_mul_node(minus_one, b)?;
        self.new_add_node(a, negated)
    }

    /// a^n，指数 n 只是普通整数，不参与求导
    pub fn new_pow_node(&mut self, a: NodeId, n: i32) -> Result<NodeId, GraphError> {
        let (a_value, a_grad) = self.operand(a)?;
        let parents = if a_grad {
            vec![(a, f64::from(n) * a_value.powi(n - 1))]
        } else {
            Vec::new()
        };
        Ok(self.push_op(NodeType::Power(a, n), a_value.powi(n), parents, a_grad))
    }

    pub fn new_exp_node(&mut self, a: NodeId) -> Result<NodeId, GraphError> {
        let (a_value, a_grad) = self.operand(a)?;
        let value = a_value.exp();
        let parents = if a_grad { vec![(a, value)] } else { Vec::new() };
        Ok(self.push_op(NodeType::Exp(a), value, parents, a_grad))
    }

    /// 自然对数；输入值必须为正，否则返回 `GraphError::Domain`
    pub fn new_ln_node(&mut self, a: NodeId) -> Result<NodeId, GraphError> {
        let (a_value, a_grad) = self.operand(a)?;
        if a_value <= 0.0 || a_value.is_nan() {
            return Err(GraphError::Domain {
                operation: "ln",
                value: a_value,
            });
        }
        let parents = if a_grad {
            vec![(a, 1.0 / a_value)]
        } else {
            Vec::new()
        };
        Ok(self.push_op(NodeType::Ln(a), a_value.ln(), parents, a_grad))
    }

    // ========== 私有 ==========

    fn operand(&self, id: NodeId) -> Result<(f64, bool), GraphError> {
        Ok((self.get_node_value(id)?, self.node_requires_grad(id)?))
    }

    fn push_op(
        &mut self,
        node_type: NodeType,
        value: f64,
        parents: Vec<(NodeId, f64)>,
        requires_grad: bool,
    ) -> NodeId {
        self.ops.push(OpNode {
            node_type,
            value,
            grad: 0.0,
            requires_grad,
            parents,
        });
        self.current_op_id(self.ops.len() - 1)
    }
}
