mod graph_backward;
mod ops_activation;
mod ops_input;
mod var_ops;

use crate::nn::Graph;
use crate::tensor::Tensor;

/// 测试用：由数值快速创建需要求导的张量
fn tensor_of(graph: &Graph, values: &[&[f64]]) -> Tensor {
    let rows: Vec<Vec<f64>> = values.iter().map(|row| row.to_vec()).collect();
    Tensor::from_values(graph, &rows, true).unwrap()
}
