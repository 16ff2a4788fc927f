/*
 * @Description  : 反向传播：梯度累加、短路、参数更新后的梯度清零
 */

use crate::nn::{Graph, GraphError};
use approx::assert_abs_diff_eq;

#[test]
fn test_square_gradient() {
    let graph = Graph::new();
    let x = graph.leaf(3.0);
    let y = &x * &x;
    y.differentiate().unwrap();
    // 同一节点经两条路径到达，梯度求和：d(x*x)/dx = 2x
    assert_eq!(x.gradient().unwrap(), 6.0);
}

#[test]
fn test_fan_out_accumulates() {
    let graph = Graph::new();
    let x = graph.leaf(2.0);
    let y = graph.leaf(5.0);
    // z = x*y + x，dz/dx = y + 1，dz/dy = x
    let z = &(&x * &y) + &x;
    z.differentiate().unwrap();
    assert_eq!(z.value().unwrap(), 12.0);
    assert_eq!(x.gradient().unwrap(), 6.0);
    assert_eq!(y.gradient().unwrap(), 2.0);
}

#[test]
fn test_repeated_differentiate_accumulates() {
    let graph = Graph::new();
    let x = graph.leaf(1.5);
    let y = x.pow(2).unwrap();
    y.differentiate().unwrap();
    y.differentiate().unwrap();
    assert_eq!(x.gradient().unwrap(), 6.0);
}

#[test]
fn test_constant_operand_short_circuits() {
    let graph = Graph::new();
    let w = graph.leaf(2.0);
    let input = graph.leaf_with_grad(3.0, false);
    let y = &w * &input;
    y.differentiate().unwrap();
    assert_eq!(w.gradient().unwrap(), 3.0);
    assert_eq!(input.gradient().unwrap(), 0.0);
}

#[test]
fn test_differentiate_root_without_grad() {
    let graph = Graph::new();
    let a = graph.leaf_with_grad(2.0, false);
    let b = &a * &a;
    assert!(!b.requires_grad().unwrap());
    // 不报错，但不会产生任何梯度
    b.differentiate().unwrap();
    assert_eq!(a.gradient().unwrap(), 0.0);
}

#[test]
fn test_differentiate_leaf_root() {
    let graph = Graph::new();
    let x = graph.leaf(1.0);
    x.differentiate().unwrap();
    assert_eq!(x.gradient().unwrap(), 1.0);
}

#[test]
fn test_intermediate_grad_is_reported() {
    let graph = Graph::new();
    let x = graph.leaf(2.0);
    let h = x.scale(3.0).unwrap();
    let y = h.pow(2).unwrap();
    y.differentiate().unwrap();
    // dy/dh = 2h = 12，dy/dx = 12 * 3
    assert_eq!(h.gradient().unwrap(), 12.0);
    assert_eq!(x.gradient().unwrap(), 36.0);
}

#[test]
fn test_apply_gradient_step_resets_grad() {
    let graph = Graph::new();
    let x = graph.leaf(3.0);
    let y = &x * &x;
    y.differentiate().unwrap();
    x.apply_gradient_step(0.1).unwrap();
    assert_abs_diff_eq!(x.value().unwrap(), 3.0 - 0.1 * 6.0, epsilon = 1e-12);
    assert_eq!(x.gradient().unwrap(), 0.0);

    // 下一轮前向传播从零开始累加
    graph.release_graph();
    let y = &x * &x;
    y.differentiate().unwrap();
    assert_abs_diff_eq!(x.gradient().unwrap(), 2.0 * 2.4, epsilon = 1e-12);
}

#[test]
fn test_apply_gradient_step_rejects_op_node() {
    let graph = Graph::new();
    let x = graph.leaf(1.0);
    let y = x.exp().unwrap();
    assert!(matches!(
        y.apply_gradient_step(0.1),
        Err(GraphError::InvalidOperation(_))
    ));
}

#[test]
fn test_zero_grad() {
    let graph = Graph::new();
    let x = graph.leaf(1.0);
    let y = x.exp().unwrap();
    y.differentiate().unwrap();
    assert!(x.gradient().unwrap() > 0.0);
    graph.zero_grad();
    assert_eq!(x.gradient().unwrap(), 0.0);
    assert_eq!(y.gradient().unwrap(), 0.0);
}

#[test]
fn test_differentiate_stale_root() {
    let graph = Graph::new();
    let x = graph.leaf(1.0);
    let y = x.exp().unwrap();
    graph.release_graph();
    assert_eq!(y.differentiate(), Err(GraphError::StaleNode(y.node_id())));
}
