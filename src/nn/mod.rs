/*
 * @Author       : 老董
 * @Date         : 2026-03-06
 * @Description  : 负责神经网络（neural network）的构建：
 *                 标量计算图、神经元/层/网络、阶段函数库、事件日志与模型持久化
 */

mod descriptor;
mod event;
mod graph;
mod layer;
mod model_io;
mod network;
mod neuron;
mod nodes;
pub mod ops;
mod var;

pub use descriptor::{LayerDescriptor, NetworkDescriptor, NeuronDescriptor};
pub use event::{Event, EventLog};
pub use graph::{Graph, GraphError, GraphInner, Phase};
pub use layer::Layer;
pub use model_io::ModelIoError;
pub use network::Network;
pub use neuron::{Neuron, NeuronId};
pub use nodes::{NodeId, NodeType};
pub use var::{Init, Var};

#[cfg(test)]
mod tests;
