use crate::errors::TensorError;
use crate::nn::Graph;
use crate::tensor::Tensor;

/// 每个数值对应一个1x1输入张量（不需要求导的输入节点）
///
/// 输入节点在创建后的第二次前向传播时回收，因此每步新建输入不会让计算图无限增长。
pub fn vector_to_tensor(graph: &Graph, values: &[f64]) -> Vec<Tensor> {
    values
        .iter()
        .map(|&v| Tensor::from_scalar(graph.input(v)))
        .collect()
}

/// 先做 L2 归一化，再转为1x1输入张量；全零向量保持原样
pub fn vector_to_normalized_tensor(graph: &Graph, values: &[f64]) -> Vec<Tensor> {
    let squared_sum: f64 = values.iter().map(|v| v * v).sum();
    let norm = if squared_sum == 0.0 {
        1.0
    } else {
        squared_sum.sqrt()
    };
    let normalized: Vec<f64> = values.iter().map(|v| v / norm).collect();
    vector_to_tensor(graph, &normalized)
}

/// 解析用户输入的逗号分隔数值，如"1, 2.5, -3"
pub fn parse_vector(text: &str) -> Result<Vec<f64>, TensorError> {
    if text.trim().is_empty() {
        return Err(TensorError::Parse(text.to_string()));
    }
    text.split(',')
        .map(|cell| {
            cell.trim()
                .parse::<f64>()
                .map_err(|_| TensorError::Parse(text.to_string()))
        })
        .collect()
}
