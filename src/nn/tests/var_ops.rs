/*
 * @Description  : Var 上的各个算子：数值与局部导数
 */

use crate::nn::ops::{sigmoid, tanh};
use crate::nn::{Graph, GraphError};
use approx::assert_abs_diff_eq;

#[test]
fn test_sub() {
    let graph = Graph::new();
    let a = graph.leaf(5.0);
    let b = graph.leaf(2.0);
    let d = &a - &b;
    assert_eq!(d.value().unwrap(), 3.0);
    d.differentiate().unwrap();
    assert_eq!(a.gradient().unwrap(), 1.0);
    assert_eq!(b.gradient().unwrap(), -1.0);
}

#[test]
fn test_neg() {
    let graph = Graph::new();
    let a = graph.leaf(5.0);
    let n = -&a;
    assert_eq!(n.value().unwrap(), -5.0);
    n.differentiate().unwrap();
    assert_eq!(a.gradient().unwrap(), -1.0);
}

#[test]
fn test_div() {
    let graph = Graph::new();
    let a = graph.leaf(6.0);
    let b = graph.leaf(3.0);
    let q = a.try_div(&b).unwrap();
    assert_abs_diff_eq!(q.value().unwrap(), 2.0, epsilon = 1e-12);
    q.differentiate().unwrap();
    assert_abs_diff_eq!(a.gradient().unwrap(), 1.0 / 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(b.gradient().unwrap(), -6.0 / 9.0, epsilon = 1e-12);

    let zero = graph.leaf(0.0);
    assert_eq!(
        a.try_div(&zero).unwrap_err(),
        GraphError::Domain {
            operation: "div",
            value: 0.0,
        }
    );
}

#[test]
fn test_pow() {
    let graph = Graph::new();
    let x = graph.leaf(2.0);
    let y = x.pow(3).unwrap();
    assert_eq!(y.value().unwrap(), 8.0);
    y.differentiate().unwrap();
    assert_eq!(x.gradient().unwrap(), 12.0);
}

#[test]
fn test_negative_pow() {
    let graph = Graph::new();
    let x = graph.leaf(2.0);
    let y = x.pow(-1).unwrap();
    assert_eq!(y.value().unwrap(), 0.5);
    y.differentiate().unwrap();
    assert_eq!(x.gradient().unwrap(), -0.25);
}

#[test]
fn test_exp_and_ln() {
    let graph = Graph::new();
    let x = graph.leaf(1.5);
    let y = x.exp().unwrap().ln().unwrap();
    assert_abs_diff_eq!(y.value().unwrap(), 1.5, epsilon = 1e-12);
    y.differentiate().unwrap();
    assert_abs_diff_eq!(x.gradient().unwrap(), 1.0, epsilon = 1e-12);
}

#[test]
fn test_ln_domain() {
    let graph = Graph::new();
    for value in [0.0, -1.0] {
        let x = graph.leaf(value);
        assert_eq!(
            x.ln().unwrap_err(),
            GraphError::Domain {
                operation: "ln",
                value,
            }
        );
    }
}

#[test]
fn test_scale_and_shift() {
    let graph = Graph::new();
    let x = graph.leaf(2.0);
    let y = x.scale(3.0).unwrap().shift(-1.0).unwrap();
    assert_eq!(y.value().unwrap(), 5.0);
    y.differentiate().unwrap();
    assert_eq!(x.gradient().unwrap(), 3.0);
}

#[test]
fn test_tanh() {
    let graph = Graph::new();
    let x = graph.leaf(0.5);
    let y = tanh(&x).unwrap();
    let expected = 0.5_f64.tanh();
    assert_abs_diff_eq!(y.value().unwrap(), expected, epsilon = 1e-12);
    y.differentiate().unwrap();
    assert_abs_diff_eq!(
        x.gradient().unwrap(),
        1.0 - expected * expected,
        epsilon = 1e-12
    );
}

#[test]
fn test_sigmoid() {
    let graph = Graph::new();
    let x = graph.leaf(0.0);
    let y = sigmoid(&x).unwrap();
    assert_abs_diff_eq!(y.value().unwrap(), 0.5, epsilon = 1e-12);
    y.differentiate().unwrap();
    assert_abs_diff_eq!(x.gradient().unwrap(), 0.25, epsilon = 1e-12);
}

#[test]
#[should_panic(expected = "Var 乘法失败")]
fn test_operator_overload_panics_across_graphs() {
    let a = Graph::new().leaf(1.0);
    let b = Graph::new().leaf(1.0);
    let _ = &a * &b;
}
