use super::tensor_of;
use crate::errors::TensorError;
use crate::nn::Graph;
use crate::tensor::Tensor;

#[test]
fn test_to_text_format() {
    let graph = Graph::new();
    let t = tensor_of(&graph, &[&[1.0, -2.5], &[0.125, 3.0]]);
    assert_eq!(t.to_text().unwrap(), "[1.0, -2.5], [0.125, 3.0]");
}

#[test]
fn test_from_text_restores_values_only() {
    let graph = Graph::new();
    let original = tensor_of(&graph, &[&[0.1, 0.2, 0.3], &[-4.0, 5e-7, 6.0]]);
    let text = original.to_text().unwrap();

    let restored = Tensor::from_text(&graph, &text).unwrap();
    assert_eq!(restored.shape(), [2, 3]);
    assert_eq!(restored.values().unwrap(), original.values().unwrap());
    // 只恢复数值：得到的是新的、不需要求导的叶子
    assert!(!restored.get(0, 0).unwrap().requires_grad().unwrap());
    assert_ne!(
        restored.get(0, 0).unwrap().node_id(),
        original.get(0, 0).unwrap().node_id()
    );
}

#[test]
fn test_from_text_with_grad() {
    let graph = Graph::new();
    let t = Tensor::from_text_with_grad(&graph, "[1, 2]", true).unwrap();
    assert_eq!(t.shape(), [1, 2]);
    assert!(t.iter().all(|v| v.requires_grad().unwrap()));
}

#[test]
fn test_from_text_tolerates_whitespace() {
    let graph = Graph::new();
    let t = Tensor::from_text(&graph, "  [ 1 ,2 ],[3, 4 ]  ").unwrap();
    assert_eq!(t.values_2d().unwrap(), vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
}

#[test]
fn test_from_text_malformed() {
    let graph = Graph::new();
    for text in ["", "1, 2", "[1, x]", "[1, 2", "[]"] {
        assert_eq!(
            Tensor::from_text(&graph, text).unwrap_err(),
            TensorError::Parse(text.to_string()),
            "文本`{text}`应当解析失败"
        );
    }
}

#[test]
fn test_from_text_ragged_rows() {
    let graph = Graph::new();
    assert_eq!(
        Tensor::from_text(&graph, "[1, 2], [3]").unwrap_err(),
        TensorError::InconsistentShape
    );
}
