/*
 * @Author       : 老董
 * @Date         : 2026-03-06
 * @Description  : 层（Layer）：有序的神经元集合，提供三个阶段的批量执行与批量参数更新
 */

use super::neuron::{Neuron, NeuronId};
use super::ops::{Activate, ActivateFn, CombineFn, ReceiveFn};
use super::{GraphError, Phase};
use crate::tensor::Tensor;
use std::fmt;

#[derive(Debug, Clone, Default)]
pub struct Layer {
    neurons: Vec<Neuron>,
}

impl Layer {
    /// 创建含`size`个神经元的层，同层神经元两两互为 adjacent（完全图）
    pub fn new(
        size: usize,
        receive_fn: ReceiveFn,
        combine_fn: CombineFn,
        activate_fn: ActivateFn,
    ) -> Self {
        let mut layer = Self::default();
        for _ in 0..size {
            layer.add_neuron(Neuron::new(receive_fn, combine_fn, activate_fn));
        }
        layer
    }

    /// 追加一个神经元，并与已有神经元互连为 adjacent
    ///
    /// 神经元原有的同层关系（例如从其他层克隆而来）会被丢弃，按本层重新建立。
    pub fn add_neuron(&mut self, mut neuron: Neuron) {
        neuron.clear_adjacent();
        let new_index = self.neurons.len();
        for (index, existing) in self.neurons.iter_mut().enumerate() {
            existing.add_adjacent(new_index);
            neuron.add_adjacent(index);
        }
        self.neurons.push(neuron);
    }

    pub fn size(&self) -> usize {
        self.neurons.len()
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    pub fn neuron(&self, index: usize) -> Result<&Neuron, GraphError> {
        self.neurons.get(index).ok_or_else(|| self.missing(index))
    }

    pub fn neuron_mut(&mut self, index: usize) -> Result<&mut Neuron, GraphError> {
        let size = self.size();
        self.neurons
            .get_mut(index)
            .ok_or_else(|| missing_neuron(index, size))
    }

    pub(in crate::nn) fn neurons_mut(&mut self) -> std::slice::IterMut<'_, Neuron> {
        self.neurons.iter_mut()
    }

    // ========== 函数槽（广播到每个神经元） ==========

    pub fn set_receive_fn(&mut self, receive_fn: ReceiveFn) {
        for neuron in &mut self.neurons {
            neuron.set_receive_fn(receive_fn);
        }
    }

    pub fn set_combine_fn(&mut self, combine_fn: CombineFn) {
        for neuron in &mut self.neurons {
            neuron.set_combine_fn(combine_fn);
        }
    }

    pub fn set_activate_fn(&mut self, activate_fn: ActivateFn) {
        for neuron in &mut self.neurons {
            neuron.set_activate_fn(activate_fn);
        }
    }

    // ========== 三个阶段（批量） ==========

    /// 每个神经元从其上游读取激活数据；上游必须位于`earlier`（本层之前的各层）中
    pub fn receive(&mut self, earlier: &[Self]) -> Result<(), GraphError> {
        for neuron in &mut self.neurons {
            let upstream = neuron
                .upstream()
                .iter()
                .map(|&id| upstream_activation(earlier, id))
                .collect::<Result<Vec<_>, _>>()?;
            neuron.receive(&upstream)?;
        }
        Ok(())
    }

    pub fn combine(&mut self) -> Result<(), GraphError> {
        self.neurons.iter_mut().try_for_each(Neuron::combine)
    }

    /// 先对全层的组合数据做快照，保证每个神经元读到的同层数据都已完整计算
    pub fn activate(&mut self) -> Result<(), GraphError> {
        let combined: Vec<Option<Tensor>> = self
            .neurons
            .iter()
            .map(|n| n.combine_data().cloned())
            .collect();

        for (index, neuron) in self.neurons.iter_mut().enumerate() {
            let adjacent = if neuron.activate_fn().reads_adjacent() {
                neuron
                    .adjacent()
                    .iter()
                    .map(|&j| {
                        let Some(slot) = combined.get(j) else {
                            return Err(GraphError::InvalidOperation(format!(
                                "第{index}个神经元的同层神经元{j}不存在（本层共{}个）",
                                combined.len()
                            )));
                        };
                        slot.as_ref().ok_or_else(|| GraphError::MissingPhaseData {
                            phase: Phase::Activate,
                            detail: format!(
                                "第{index}个神经元的同层神经元{j}尚未计算组合数据"
                            ),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?
            } else {
                Vec::new()
            };
            neuron.activate(&adjacent)?;
        }
        Ok(())
    }

    /// receive → combine → activate，遇到第一个错误即返回
    pub fn fire_all(&mut self, earlier: &[Self]) -> Result<(), GraphError> {
        self.receive(earlier)?;
        self.combine()?;
        self.activate()
    }

    pub fn gradient_descent(&self, learning_rate: f64) -> Result<(), GraphError> {
        self.neurons
            .iter()
            .try_for_each(|n| n.gradient_descent(learning_rate))
    }

    pub fn clear_phase_data(&mut self) {
        self.neurons.iter_mut().for_each(Neuron::clear_phase_data);
    }

    fn missing(&self, index: usize) -> GraphError {
        missing_neuron(index, self.size())
    }
}

fn missing_neuron(index: usize, size: usize) -> GraphError {
    GraphError::InvalidOperation(format!("层中不存在第{index}个神经元（共{size}个）"))
}

fn upstream_activation(earlier: &[Layer], id: NeuronId) -> Result<&Tensor, GraphError> {
    let layer = earlier.get(id.layer).ok_or_else(|| {
        GraphError::InvalidOperation(format!("上游神经元{id}不在本层之前的层中"))
    })?;
    layer
        .neuron(id.index)?
        .activate_data()
        .ok_or_else(|| GraphError::MissingPhaseData {
            phase: Phase::Receive,
            detail: format!("上游神经元{id}尚未计算激活数据"),
        })
}

/// 依次列出每个神经元的激活数据
impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, neuron) in self.neurons.iter().enumerate() {
            writeln!(f, "{index}:")?;
            match neuron.activate_data() {
                Some(data) => write!(f, "{data}")?,
                None => writeln!(f, "[ ]")?,
            }
        }
        Ok(())
    }
}
