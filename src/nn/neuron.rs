/*
 * @Author       : 老董
 * @Date         : 2026-03-06
 * @Description  : 神经元（Neuron）：网络中的一个图节点
 *
 * 持有自己的参数张量与三个阶段（receive → combine → activate）的数据，
 * 以及到同层（adjacent）、上游（upstream）、下游（downstream）神经元的边。
 * 边只是拓扑元数据（下标），不拥有对方。
 */

use super::ops::{Activate, ActivateFn, CombineFn, ReceiveFn};
use super::{GraphError, Phase};
use crate::tensor::Tensor;

/// 神经元在网络中的地址：第`layer`层的第`index`个神经元
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NeuronId {
    pub layer: usize,
    pub index: usize,
}

impl NeuronId {
    pub const fn new(layer: usize, index: usize) -> Self {
        Self { layer, index }
    }
}

impl std::fmt::Display for NeuronId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.layer, self.index)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Neuron {
    receive_data: Option<Tensor>,
    combine_data: Option<Tensor>,
    activate_data: Option<Tensor>,
    weights: Option<Tensor>,
    biases: Option<Tensor>,
    receive_fn: ReceiveFn,
    combine_fn: CombineFn,
    activate_fn: ActivateFn,
    /// 同层其它神经元在本层中的下标
    adjacent: Vec<usize>,
    upstream: Vec<NeuronId>,
    downstream: Vec<NeuronId>,
}

impl Neuron {
    pub fn new(receive_fn: ReceiveFn, combine_fn: CombineFn, activate_fn: ActivateFn) -> Self {
        Self {
            receive_fn,
            combine_fn,
            activate_fn,
            ..Self::default()
        }
    }

    // ========== 三个阶段 ==========

    /// 接收：由上游神经元的激活数据（按上游顺序）构造接收数据
    pub fn receive(&mut self, upstream: &[&Tensor]) -> Result<(), GraphError> {
        self.receive_data = Some(self.receive_fn.compute(upstream)?);
        Ok(())
    }

    /// 组合：由接收数据、权重、偏置构造组合数据
    pub fn combine(&mut self) -> Result<(), GraphError> {
        let received = self
            .receive_data
            .as_ref()
            .ok_or_else(|| GraphError::MissingPhaseData {
                phase: Phase::Combine,
                detail: "接收数据为空，请先执行 receive".to_string(),
            })?;
        let combined =
            self.combine_fn
                .compute(received, self.weights.as_ref(), self.biases.as_ref())?;
        self.combine_data = Some(combined);
        Ok(())
    }

    /// 激活：由组合数据（softmax 还需同层其它神经元的组合数据）构造激活数据
    pub fn activate(&mut self, adjacent: &[&Tensor]) -> Result<(), GraphError> {
        let combined = self
            .combine_data
            .as_ref()
            .ok_or_else(|| GraphError::MissingPhaseData {
                phase: Phase::Activate,
                detail: "组合数据为空，请先执行 combine".to_string(),
            })?;
        self.activate_data = Some(self.activate_fn.activate(combined, adjacent)?);
        Ok(())
    }

    /// 对权重、偏置的每个元素执行一步梯度下降（先权重后偏置）
    pub fn gradient_descent(&self, learning_rate: f64) -> Result<(), GraphError> {
        let (Some(weights), Some(biases)) = (&self.weights, &self.biases) else {
            return Err(GraphError::MissingParameters);
        };
        weights.apply_gradient_step(learning_rate)?;
        biases.apply_gradient_step(learning_rate)
    }

    /// 清空三个阶段的数据（参数保留）
    pub fn clear_phase_data(&mut self) {
        self.receive_data = None;
        self.combine_data = None;
        self.activate_data = None;
    }

    // ========== 数据访问 ==========

    pub const fn receive_data(&self) -> Option<&Tensor> {
        self.receive_data.as_ref()
    }

    pub fn set_receive_data(&mut self, data: Tensor) {
        self.receive_data = Some(data);
    }

    pub const fn combine_data(&self) -> Option<&Tensor> {
        self.combine_data.as_ref()
    }

    pub fn set_combine_data(&mut self, data: Tensor) {
        self.combine_data = Some(data);
    }

    pub const fn activate_data(&self) -> Option<&Tensor> {
        self.activate_data.as_ref()
    }

    pub fn set_activate_data(&mut self, data: Tensor) {
        self.activate_data = Some(data);
    }

    pub const fn weights(&self) -> Option<&Tensor> {
        self.weights.as_ref()
    }

    pub fn set_weights(&mut self, weights: Tensor) {
        self.weights = Some(weights);
    }

    pub const fn biases(&self) -> Option<&Tensor> {
        self.biases.as_ref()
    }

    pub fn set_biases(&mut self, biases: Tensor) {
        self.biases = Some(biases);
    }

    /// 权重的文本形式（无权重时为 None）
    pub fn weights_text(&self) -> Result<Option<String>, GraphError> {
        self.weights.as_ref().map(Tensor::to_text).transpose()
    }

    /// 偏置的文本形式（无偏置时为 None）
    pub fn biases_text(&self) -> Result<Option<String>, GraphError> {
        self.biases.as_ref().map(Tensor::to_text).transpose()
    }

    // ========== 函数槽 ==========

    pub const fn receive_fn(&self) -> ReceiveFn {
        self.receive_fn
    }

    pub fn set_receive_fn(&mut self, receive_fn: ReceiveFn) {
        self.receive_fn = receive_fn;
    }

    pub const fn combine_fn(&self) -> CombineFn {
        self.combine_fn
    }

    pub fn set_combine_fn(&mut self, combine_fn: CombineFn) {
        self.combine_fn = combine_fn;
    }

    pub const fn activate_fn(&self) -> ActivateFn {
        self.activate_fn
    }

    pub fn set_activate_fn(&mut self, activate_fn: ActivateFn) {
        self.activate_fn = activate_fn;
    }

    // ========== 边 ==========

    pub fn adjacent(&self) -> &[usize] {
        &self.adjacent
    }

    pub fn upstream(&self) -> &[NeuronId] {
        &self.upstream
    }

    pub fn downstream(&self) -> &[NeuronId] {
        &self.downstream
    }

    pub(in crate::nn) fn add_adjacent(&mut self, index: usize) {
        self.adjacent.push(index);
    }

    pub(in crate::nn) fn add_upstream(&mut self, id: NeuronId) {
        self.upstream.push(id);
    }

    pub(in crate::nn) fn add_downstream(&mut self, id: NeuronId) {
        self.downstream.push(id);
    }

    /// 清空上下游边（同层边不受影响）
    pub(in crate::nn) fn clear_adjacent(&mut self) {
        self.adjacent.clear();
    }

    pub(in crate::nn) fn clear_edges(&mut self) {
        self.upstream.clear();
        self.downstream.clear();
    }
}
