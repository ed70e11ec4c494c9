use crate::geoalg::element::Element;

use super::layers::{Gradient, Learnable};

/// Builds the per-layer state an optimization strategy needs.
/// `G` is the layer's gradient type and `T` the scalar type of the learn rate.
pub trait Optimizer<G, T> {
    type Accumulator: Accumulator<G, T>;

    fn accumulator(&self) -> Self::Accumulator;
}

/// Per-layer optimizer state.
/// Collects gradients during training and turns them into one parameter update.
pub trait Accumulator<G, T> {
    fn accumulate(&mut self, gradient: &G);

    /// Updates `layer` from everything accumulated so far, then starts over from zero.
    fn apply<L: Learnable<Gradient = G>>(&mut self, layer: &mut L, learn_rate: T);
}

/// Plain gradient descent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sgd;

/// Sum of the gradients seen since the last update.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientDescent<G> {
    gradient: G,
}

impl<G> GradientDescent<G> {
    pub fn gradient(&self) -> &G {
        &self.gradient
    }
}

impl<G: Gradient<T>, T: Element> Optimizer<G, T> for Sgd {
    type Accumulator = GradientDescent<G>;

    fn accumulator(&self) -> GradientDescent<G> {
        GradientDescent { gradient: G::zero() }
    }
}

impl<G: Gradient<T>, T: Element> Accumulator<G, T> for GradientDescent<G> {
    fn accumulate(&mut self, gradient: &G) {
        self.gradient.accumulate(gradient);
    }

    fn apply<L: Learnable<Gradient = G>>(&mut self, layer: &mut L, learn_rate: T) {
        layer.apply_gradient(&self.gradient.scaled(learn_rate));
        self.gradient = G::zero();
    }
}

/// Gradient descent with a velocity term: each step is `beta * previous_step + learn_rate * gradient`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Momentum<T = f32> {
    pub beta: T,
}

impl<T> Momentum<T> {
    pub const fn new(beta: T) -> Self {
        Self { beta }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MomentumAccumulator<G, T> {
    gradient: G,
    velocity: G,
    beta: T,
}

impl<G, T> MomentumAccumulator<G, T> {
    pub fn gradient(&self) -> &G {
        &self.gradient
    }

    /// Last step applied to the layer.
    pub fn velocity(&self) -> &G {
        &self.velocity
    }
}

impl<G: Gradient<T>, T: Element> Optimizer<G, T> for Momentum<T> {
    type Accumulator = MomentumAccumulator<G, T>;

    fn accumulator(&self) -> MomentumAccumulator<G, T> {
        MomentumAccumulator { gradient: G::zero(), velocity: G::zero(), beta: self.beta }
    }
}

impl<G: Gradient<T>, T: Element> Accumulator<G, T> for MomentumAccumulator<G, T> {
    fn accumulate(&mut self, gradient: &G) {
        self.gradient.accumulate(gradient);
    }

    fn apply<L: Learnable<Gradient = G>>(&mut self, layer: &mut L, learn_rate: T) {
        let mut velocity = self.velocity.scaled(self.beta);
        velocity.accumulate(&self.gradient.scaled(learn_rate));
        layer.apply_gradient(&velocity);

        self.velocity = velocity;
        self.gradient = G::zero();
    }
}
