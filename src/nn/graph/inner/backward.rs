/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : GraphInner 反向传播与参数更新
 */

use super::super::error::GraphError;
use super::GraphInner;
use crate::nn::NodeId;

impl GraphInner {
    /// 以`root`为起点做反向传播，把梯度累加到所有可达且需要求导的叶子节点上
    ///
    /// 算子区按构造顺序存放（操作数总在结果之前），因此倒序扫描一遍即为拓扑序，
    /// 无需递归。被多个算子使用的节点（fan-out）会收到多份贡献，全部求和。
    /// 多次调用会继续累加（与只调用一次后再调用一次的语义一致）。
    pub fn backward(&mut self, root: NodeId) -> Result<(), GraphError> {
        if !self.node_requires_grad(root)? {
            eprintln!("[neuron_net 警告] 对不需要求导的节点{root}调用反向传播，不会产生任何梯度。");
            return Ok(());
        }

        let root_index = match root {
            NodeId::Op { .. } => self.get_op(root)?.0,
            _ => {
                self.get_leaf_like_mut(root)?.grad += 1.0;
                return Ok(());
            }
        };

        // 本次反向传播的伴随值（只覆盖 root 及其之前的算子）
        let mut adjoints = vec![0.0; root_index + 1];
        adjoints[root_index] = 1.0;

        for index in (0..=root_index).rev() {
            let adjoint = adjoints[index];
            if adjoint == 0.0 {
                continue;
            }
            self.ops[index].grad += adjoint;
            for k in 0..self.ops[index].parents.len() {
                let (parent, partial) = self.ops[index].parents[k];
                match parent {
                    NodeId::Op { index: parent_index, .. } => {
                        adjoints[parent_index] += adjoint * partial;
                    }
                    _ => {
                        self.get_leaf_like_mut(parent)?.grad += adjoint * partial;
                    }
                }
            }
        }

        Ok(())
    }

    /// 对叶子节点执行一步梯度下降：value -= rate * grad，随后梯度清零
    ///
    /// 清零保证该叶子进入下一轮前向传播时不会重复累加上一轮的梯度。
    pub fn apply_gradient_step(&mut self, id: NodeId, learning_rate: f64) -> Result<(), GraphError> {
        match id {
            NodeId::Op { .. } => Err(GraphError::InvalidOperation(format!(
                "节点{id}不是叶子节点，无法执行梯度下降"
            ))),
            _ => {
                let leaf = self.get_leaf_like_mut(id)?;
                leaf.value -= learning_rate * leaf.grad;
                leaf.grad = 0.0;
                Ok(())
            }
        }
    }

    /// 清零所有节点的梯度（PyTorch 风格）
    pub fn zero_grad(&mut self) {
        for leaf in self.leaves.iter_mut().chain(self.inputs.iter_mut().flatten()) {
            leaf.grad = 0.0;
        }
        for op in &mut self.ops {
            op.grad = 0.0;
        }
    }
}
