use rand::Rng;

use crate::geoalg::{element::Element, matrix::Matrix};

pub mod activation;
pub mod linear;
pub mod print;

/// Buffer shape a layer's parameter gradient is collected in.
pub trait Gradient<T>: Clone {
    fn zero() -> Self;

    /// Adds `other` into this gradient.
    fn accumulate(&mut self, other: &Self);

    fn scaled(&self, factor: T) -> Self;
}

/// Gradient of a layer without learnable parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EmptyGradient;

impl<T: Element> Gradient<T> for EmptyGradient {
    fn zero() -> Self { EmptyGradient }

    fn accumulate(&mut self, _other: &Self) {}

    fn scaled(&self, _factor: T) -> Self { EmptyGradient }
}

impl<const R: usize, const C: usize, T: Element> Gradient<T> for Matrix<R, C, T> {
    fn zero() -> Self {
        Matrix::zeroed()
    }

    fn accumulate(&mut self, other: &Self) {
        *self += *other;
    }

    fn scaled(&self, factor: T) -> Self {
        self.scale(factor)
    }
}

impl<A: Gradient<T>, B: Gradient<T>, T: Element> Gradient<T> for (A, B) {
    fn zero() -> Self {
        (A::zero(), B::zero())
    }

    fn accumulate(&mut self, other: &Self) {
        self.0.accumulate(&other.0);
        self.1.accumulate(&other.1);
    }

    fn scaled(&self, factor: T) -> Self {
        (self.0.scaled(factor), self.1.scaled(factor))
    }
}

/// Parameter side of a layer: initialization and gradient application.
/// The defaults describe a layer with nothing to learn.
pub trait Learnable {
    type Gradient;

    /// (Re)initializes the learnable parameters.
    fn init<G: Rng + ?Sized>(&mut self, _rng: &mut G) {}

    /// Subtracts an already learn-rate-scaled gradient from the parameters.
    fn apply_gradient(&mut self, _gradient: &Self::Gradient) {}

    /// Dumps the parameters to stdout.
    fn print(&self) {}
}

/// Data side of a layer for one input type.
/// A layer may propagate several input types, e.g. batches of different widths.
pub trait Propagates<I>: Learnable {
    type Output;

    fn forward(&self, input: &I) -> Self::Output;

    /// Error to hand upstream, given the forward input and the error arriving from downstream.
    fn backward(&self, input: &I, next_error: &Self::Output) -> I;

    /// This layer's parameter gradient for one forward input.
    fn calc_gradient(&self, input: &I, next_error: &Self::Output) -> Self::Gradient;
}

/// Passes data and errors through untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Identity;

impl Learnable for Identity {
    type Gradient = EmptyGradient;
}

impl<I: Clone> Propagates<I> for Identity {
    type Output = I;

    fn forward(&self, input: &I) -> I {
        input.clone()
    }

    fn backward(&self, _input: &I, next_error: &I) -> I {
        next_error.clone()
    }

    fn calc_gradient(&self, _input: &I, _next_error: &I) -> EmptyGradient {
        EmptyGradient
    }
}
