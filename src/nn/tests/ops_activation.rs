/*
 * @Description  : 激活阶段策略：逐元素激活与跨同层神经元的 softmax
 */

use super::tensor_of;
use crate::nn::ops::{Activate, ActivateFn, CombineFn, Identity, ReceiveFn, Sigmoid, Softmax, Tanh};
use crate::nn::{Graph, GraphError, Layer, Phase};
use approx::assert_abs_diff_eq;

#[test]
fn test_elementwise_activations_keep_shape() {
    let graph = Graph::new();
    let combined = tensor_of(&graph, &[&[-1.0, 0.0, 2.0]]);

    let identity = Identity.activate(&combined, &[]).unwrap();
    assert_eq!(identity.values().unwrap(), vec![-1.0, 0.0, 2.0]);

    let tanh = Tanh.activate(&combined, &[]).unwrap();
    assert_eq!(tanh.shape(), [1, 3]);
    for (got, x) in tanh.values().unwrap().iter().zip([-1.0_f64, 0.0, 2.0]) {
        assert_abs_diff_eq!(*got, x.tanh(), epsilon = 1e-12);
    }

    let sigmoid = Sigmoid.activate(&combined, &[]).unwrap();
    for (got, x) in sigmoid.values().unwrap().iter().zip([-1.0_f64, 0.0, 2.0]) {
        assert_abs_diff_eq!(*got, 1.0 / (1.0 + (-x).exp()), epsilon = 1e-12);
    }
}

#[test]
fn test_only_softmax_reads_adjacent() {
    assert!(!ActivateFn::from(Identity).reads_adjacent());
    assert!(!ActivateFn::from(Tanh).reads_adjacent());
    assert!(!ActivateFn::from(Sigmoid).reads_adjacent());
    assert!(ActivateFn::from(Softmax).reads_adjacent());
    assert_eq!(ActivateFn::default(), ActivateFn::from(Tanh));
}

#[test]
fn test_softmax_across_layer() {
    let graph = Graph::new();
    let mut layer = Layer::new(
        3,
        ReceiveFn::RowAppend,
        CombineFn::Identity,
        Softmax.into(),
    );
    for (i, v) in [0.1, 0.2, 0.3].into_iter().enumerate() {
        layer
            .neuron_mut(i)
            .unwrap()
            .set_combine_data(tensor_of(&graph, &[&[v]]));
    }
    layer.activate().unwrap();

    let expected = [0.3006096, 0.3322250, 0.3671654];
    let mut total = 0.0;
    for (neuron, e) in layer.neurons().iter().zip(expected) {
        let a = neuron.activate_data().unwrap().item().unwrap();
        assert_abs_diff_eq!(a, e, epsilon = 1e-6);
        total += a;
    }
    assert_abs_diff_eq!(total, 1.0, epsilon = 1e-12);
}

#[test]
fn test_softmax_gradient() {
    let graph = Graph::new();
    let z0 = tensor_of(&graph, &[&[1.0]]);
    let z1 = tensor_of(&graph, &[&[2.0]]);
    let a0 = Softmax.activate(&z0, &[&z1]).unwrap();
    a0.differentiate().unwrap();

    let p0 = 1.0_f64.exp() / (1.0_f64.exp() + 2.0_f64.exp());
    let p1 = 1.0 - p0;
    // ∂p0/∂z0 = p0(1-p0)，∂p0/∂z1 = -p0·p1
    assert_abs_diff_eq!(z0.gradients().unwrap()[0], p0 * (1.0 - p0), epsilon = 1e-12);
    assert_abs_diff_eq!(z1.gradients().unwrap()[0], -p0 * p1, epsilon = 1e-12);
}

#[test]
fn test_softmax_requires_adjacent_combine_data() {
    let graph = Graph::new();
    let mut layer = Layer::new(2, ReceiveFn::RowAppend, CombineFn::Identity, Softmax.into());
    layer
        .neuron_mut(0)
        .unwrap()
        .set_combine_data(tensor_of(&graph, &[&[0.5]]));
    assert!(matches!(
        layer.activate(),
        Err(GraphError::MissingPhaseData {
            phase: Phase::Activate,
            ..
        })
    ));
}
