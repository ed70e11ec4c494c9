use crate::geoalg::{element::Element, matrix::Matrix};
use crate::nn::activation_functions::{ActivationFunction, LeakyReluFunction, ReluFunction, SigmoidFunction, TanhFunction};

use super::{EmptyGradient, Learnable, Propagates};

/// Applies a scalar activation function to every element.
/// Stateless apart from the function's own parameters, so it has nothing to learn.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Activation<F> {
    function: F,
}

pub type Tanh = Activation<TanhFunction>;
pub type Sigmoid = Activation<SigmoidFunction>;
pub type LeakyRelu<T = f32> = Activation<LeakyReluFunction<T>>;
pub type Relu<T = f32> = Activation<ReluFunction<T>>;

impl<F> Activation<F> {
    pub const fn new(function: F) -> Self {
        Self { function }
    }

    pub fn function(&self) -> &F {
        &self.function
    }
}

impl Activation<TanhFunction> {
    pub const fn tanh() -> Self {
        Self::new(TanhFunction)
    }
}

impl Activation<SigmoidFunction> {
    pub const fn sigmoid() -> Self {
        Self::new(SigmoidFunction)
    }
}

impl<T: Element> Activation<ReluFunction<T>> {
    pub fn relu() -> Self {
        Self::new(ReluFunction::new())
    }
}

impl<T: Element> Activation<LeakyReluFunction<T>> {
    pub fn leaky_relu(alpha: T) -> Self {
        Self::new(LeakyReluFunction::new(alpha))
    }
}

impl<F> Learnable for Activation<F> {
    type Gradient = EmptyGradient;
}

impl<F, const R: usize, const C: usize, T> Propagates<Matrix<R, C, T>> for Activation<F>
where
    T: Element,
    F: ActivationFunction<T>,
{
    type Output = Matrix<R, C, T>;

    fn forward(&self, input: &Matrix<R, C, T>) -> Matrix<R, C, T> {
        input.map(|x| self.function.apply(x))
    }

    fn backward(&self, input: &Matrix<R, C, T>, next_error: &Matrix<R, C, T>) -> Matrix<R, C, T> {
        input.zip_map(next_error, |x, error| self.function.derive(x) * error)
    }

    fn calc_gradient(&self, _input: &Matrix<R, C, T>, _next_error: &Matrix<R, C, T>) -> EmptyGradient {
        EmptyGradient
    }
}
