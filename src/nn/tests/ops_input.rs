use crate::errors::TensorError;
use crate::nn::Graph;
use crate::nn::ops::{parse_vector, vector_to_normalized_tensor, vector_to_tensor};
use approx::assert_abs_diff_eq;

#[test]
fn test_vector_to_tensor() {
    let graph = Graph::new();
    let tensors = vector_to_tensor(&graph, &[1.0, -2.0, 3.5]);
    assert_eq!(tensors.len(), 3);
    for (t, v) in tensors.iter().zip([1.0, -2.0, 3.5]) {
        assert_eq!(t.shape(), [1, 1]);
        assert_eq!(t.item().unwrap(), v);
        assert!(!t.get(0, 0).unwrap().requires_grad().unwrap());
    }
}

#[test]
fn test_vector_to_normalized_tensor() {
    let graph = Graph::new();
    let tensors = vector_to_normalized_tensor(&graph, &[3.0, 4.0]);
    assert_abs_diff_eq!(tensors[0].item().unwrap(), 0.6, epsilon = 1e-12);
    assert_abs_diff_eq!(tensors[1].item().unwrap(), 0.8, epsilon = 1e-12);
}

#[test]
fn test_vector_to_normalized_tensor_all_zero() {
    let graph = Graph::new();
    let tensors = vector_to_normalized_tensor(&graph, &[0.0, 0.0]);
    assert!(tensors.iter().all(|t| t.item().unwrap() == 0.0));
}

#[test]
fn test_parse_vector() {
    assert_eq!(parse_vector("1, 2.5,-3").unwrap(), vec![1.0, 2.5, -3.0]);
    assert_eq!(parse_vector(" 7 ").unwrap(), vec![7.0]);
    for text in ["", "1,,2", "a, b"] {
        assert_eq!(
            parse_vector(text).unwrap_err(),
            TensorError::Parse(text.to_string())
        );
    }
}
