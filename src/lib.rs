//! # Neuron Net
//!
//! `neuron_net`是一个以神经元对象图搭建多层感知机的（玩具）框架：
//! 每个神经元依次执行接收（receive）、组合（combine）、激活（activate）三个阶段，
//! 所有数值运算都落在标量级的反向自动微分计算图上，
//! 由一个标量损失触发求导后，再对各神经元的权重与偏置做梯度下降。
//!

pub mod errors;
pub mod nn;
pub mod tensor;
