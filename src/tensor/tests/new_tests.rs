use super::tensor_of;
use crate::errors::TensorError;
use crate::nn::{Graph, GraphError};
use crate::tensor::Tensor;

#[test]
fn test_new_rectangular_grid() {
    let graph = Graph::new();
    let t = tensor_of(&graph, &[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
    assert_eq!(t.shape(), [2, 3]);
    assert_eq!(t.rows(), 2);
    assert_eq!(t.cols(), 3);
    assert_eq!(t.size(), 6);
    assert_eq!(t.values().unwrap(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    assert_eq!(
        t.values_2d().unwrap(),
        vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]
    );
}

#[test]
fn test_new_rejects_empty_grid() {
    assert_eq!(Tensor::new(vec![]).unwrap_err(), TensorError::EmptyList);
    assert_eq!(Tensor::new(vec![vec![]]).unwrap_err(), TensorError::EmptyList);
}

#[test]
fn test_new_rejects_ragged_grid() {
    let graph = Graph::new();
    let cells = vec![
        vec![graph.leaf(1.0), graph.leaf(2.0)],
        vec![graph.leaf(3.0)],
    ];
    assert_eq!(
        Tensor::new(cells).unwrap_err(),
        TensorError::InconsistentShape
    );
}

#[test]
fn test_from_values_respects_requires_grad() {
    let graph = Graph::new();
    let trainable = Tensor::from_values(&graph, &[vec![1.0]], true).unwrap();
    let constant = Tensor::from_values(&graph, &[vec![1.0]], false).unwrap();
    assert!(trainable.get(0, 0).unwrap().requires_grad().unwrap());
    assert!(!constant.get(0, 0).unwrap().requires_grad().unwrap());
}

#[test]
fn test_get_and_set() {
    let graph = Graph::new();
    let mut t = tensor_of(&graph, &[&[1.0, 2.0], &[3.0, 4.0]]);
    assert_eq!(t.get(1, 0).unwrap().value().unwrap(), 3.0);

    t.set(1, 0, graph.leaf(9.0)).unwrap();
    assert_eq!(t.values().unwrap(), vec![1.0, 2.0, 9.0, 4.0]);
    // 形状不变
    assert_eq!(t.shape(), [2, 2]);
}

#[test]
fn test_index_out_of_range() {
    let graph = Graph::new();
    let mut t = tensor_of(&graph, &[&[1.0, 2.0]]);
    assert_eq!(
        t.get(1, 0).unwrap_err(),
        TensorError::IndexOutOfRange {
            row: 1,
            col: 0,
            shape: vec![1, 2],
        }
    );
    assert!(t.set(0, 2, graph.leaf(0.0)).is_err());
}

#[test]
fn test_cells_share_graph_nodes() {
    let graph = Graph::new();
    let x = graph.leaf(2.0);
    let t = Tensor::from_row(vec![x.clone(), x.clone()]).unwrap();
    x.set_value(5.0).unwrap();
    // 张量只是容器，元素与原节点是同一个
    assert_eq!(t.values().unwrap(), vec![5.0, 5.0]);
}

#[test]
fn test_item() {
    let graph = Graph::new();
    let scalar = Tensor::from_scalar(graph.leaf(0.5));
    assert_eq!(scalar.item().unwrap(), 0.5);

    let row = tensor_of(&graph, &[&[1.0, 2.0]]);
    assert!(matches!(row.item(), Err(GraphError::InvalidOperation(_))));
}

#[test]
fn test_iter_is_row_major() {
    let graph = Graph::new();
    let t = tensor_of(&graph, &[&[1.0, 2.0], &[3.0, 4.0]]);
    let values: Vec<f64> = (&t).into_iter().map(|v| v.value().unwrap()).collect();
    assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0]);
}
