use super::tensor_of;
use crate::nn::Graph;

#[test]
fn test_display_rows() {
    let graph = Graph::new();
    let t = tensor_of(&graph, &[&[1.0, 2.5], &[-3.0, 0.0]]);
    assert_eq!(format!("{t}"), "[ 1.0 2.5 ]\n[ -3.0 0.0 ]\n");
}

#[test]
fn test_display_released_nodes() {
    let graph = Graph::new();
    let x = tensor_of(&graph, &[&[1.0]]);
    let y = x.map(|v| v.exp().unwrap());
    graph.release_graph();
    // 算子节点已随计算图释放，叶子仍然可读
    assert_eq!(format!("{y}"), "[ ? ]\n");
    assert_eq!(format!("{x}"), "[ 1.0 ]\n");
}
