use std::mem::size_of;

use fixednn::network;
use fixednn::geoalg::matrix::*;
use fixednn::nn::layers::{activation::*, linear::Linear, print::Print, Identity};
use fixednn::nn::network::*;

#[test]
fn linear_then_relu() {
    let network: Network<Vector<2, i32>, _> = network![
        Linear::<2, 3, i32>::from_flat([1, 2, 3, 4, 5, 6], [2, 3, 4]),
        Relu::<i32>::relu(),
    ];

    let output = network.forward(&Matrix::column_vector([1, 0]));
    assert_eq!(output, Matrix::column_vector([3, 6, 9]));
}

#[test]
fn constant_demo_network() {
    let network: Network<Vector<2>, _> = network![
        Linear::<2, 4>::from_flat([1., -2., -3., -4., 5., 6., -7., -8.], [0., 1., 0., 1.]),
        Relu::<f32>::relu(),
        Linear::<4, 1>::from_flat([-1., -2., 2., 1.], [1.]),
        Relu::<f32>::relu(),
    ];

    assert_eq!(network.forward(&Matrix::column_vector([1., 1.])), Matrix::column_vector([23.]));
}

#[test]
fn network_holds_only_parameters() {
    type Small = Network<Vector<2, f32>, (Linear<2, 3, f32>, (Tanh, ()))>;
    assert_eq!(size_of::<Small>(), 9 * size_of::<f32>());
    assert_eq!(size_of::<Network<Vector<2, f32>, (Identity, (Relu, ()))>>(), size_of::<f32>());
}

#[test]
fn identity_and_print_are_transparent() {
    let network: Network<Vector<3, i32>, _> = network![Identity, Print::new("hidden"), Identity];
    let input = Matrix::column_vector([4, -5, 6]);

    assert_eq!(network.len(), 3);
    assert_eq!(network.forward(&input), input);
}

#[test]
fn matrix_algebra_properties() {
    let a = Matrix::<3, 4, i64>::from_fn(|r, c| (r as i64 + 1) * (c as i64 * 3 - 2));
    let b = Matrix::<3, 4, i64>::from_fn(|r, c| r as i64 - c as i64 * 7);

    assert_eq!(a + b - b, a);
    assert_eq!(a.transpose().transpose(), a);
    assert_eq!(a * Matrix::<4, 4, i64>::identity(), a);

    let (left, right) = a.column_cat::<4, 8>(&b).column_split::<4, 4>();
    assert_eq!((left, right), (a, b));
}

#[test]
fn batch_forward_matches_single_samples() {
    let batched: Network<Matrix<2, 3, i32>, _> = network![
        Linear::<2, 2, i32>::from_flat([1, -1, 2, 3], [1, -1]),
        Relu::<i32>::relu(),
    ];
    let single = Network::<Vector<2, i32>, _>::new(batched.layers().clone());

    let batch = Matrix::<2, 3, i32>::from_flat([
        1, 0, -2,
        2, 5, 1,
    ]);
    let output = batched.forward(&batch);

    for column in 0..3 {
        let x = Matrix::column_vector([*batch.at(0, column), *batch.at(1, column)]);
        let expected = Matrix::column_vector([*output.at(0, column), *output.at(1, column)]);
        assert_eq!(single.forward(&x), expected);
    }
}
