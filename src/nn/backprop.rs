use crate::geoalg::matrix::Shaped;

use super::cost_functions::Cost;
use super::layers::Propagates;
use super::network::{Chain, Network};
use super::optimizers::{Accumulator, Optimizer, Sgd};

/// Reverse-mode differentiation over a layer chain, with one optimizer accumulator per layer.
pub trait Backpropagate<I: Shaped, O>: Chain<I> {
    /// Nested pairs of accumulators mirroring the layer chain.
    type Accumulators;

    fn accumulators(&self, optimizer: &O) -> Self::Accumulators;

    /// Runs `input` forward, then walks the chain right to left folding every layer's gradient into its accumulator.
    /// Returns the error propagated past the first layer. Never touches the layer parameters.
    fn train<C: Cost<Self::Output>>(
        &self,
        accumulators: &mut Self::Accumulators,
        input: &I,
        expected: &Self::Output,
        cost: &C,
    ) -> I;

    /// Applies and clears every accumulator.
    fn update(&mut self, accumulators: &mut Self::Accumulators, learn_rate: I::Scalar);
}

impl<I: Shaped + Clone, O> Backpropagate<I, O> for () {
    type Accumulators = ();

    fn accumulators(&self, _optimizer: &O) -> Self::Accumulators {}

    fn train<C: Cost<Self::Output>>(
        &self,
        _accumulators: &mut Self::Accumulators,
        input: &I,
        expected: &Self::Output,
        cost: &C,
    ) -> I {
        cost.derive(input, expected)
    }

    fn update(&mut self, _accumulators: &mut Self::Accumulators, _learn_rate: I::Scalar) {}
}

impl<I, O, H, Tail> Backpropagate<I, O> for (H, Tail)
where
    I: Shaped,
    H: Propagates<I>,
    H::Output: Shaped<Scalar = I::Scalar>,
    O: Optimizer<H::Gradient, I::Scalar>,
    Tail: Backpropagate<H::Output, O>,
{
    type Accumulators = (O::Accumulator, Tail::Accumulators);

    fn accumulators(&self, optimizer: &O) -> Self::Accumulators {
        (optimizer.accumulator(), self.1.accumulators(optimizer))
    }

    fn train<C: Cost<Self::Output>>(
        &self,
        accumulators: &mut Self::Accumulators,
        input: &I,
        expected: &Self::Output,
        cost: &C,
    ) -> I {
        let output = self.0.forward(input);
        let next_error = self.1.train(&mut accumulators.1, &output, expected, cost);

        accumulators.0.accumulate(&self.0.calc_gradient(input, &next_error));
        self.0.backward(input, &next_error)
    }

    fn update(&mut self, accumulators: &mut Self::Accumulators, learn_rate: I::Scalar) {
        accumulators.0.apply(&mut self.0, learn_rate);
        self.1.update(&mut accumulators.1, learn_rate);
    }
}

/// Training session over a borrowed network.
/// `train` may be called any number of times to accumulate gradients; `update` applies them.
pub struct Backprop<'a, I, L, C, O = Sgd>
where
    I: Shaped,
    L: Backpropagate<I, O>,
{
    network: &'a mut Network<I, L>,
    accumulators: L::Accumulators,
    cost: C,
}

impl<'a, I, L, C> Backprop<'a, I, L, C, Sgd>
where
    I: Shaped,
    L: Backpropagate<I, Sgd>,
    C: Cost<L::Output>,
{
    /// Plain gradient descent.
    pub fn new(network: &'a mut Network<I, L>, cost: C) -> Self {
        Self::with_optimizer(network, cost, &Sgd)
    }
}

impl<'a, I, L, C, O> Backprop<'a, I, L, C, O>
where
    I: Shaped,
    L: Backpropagate<I, O>,
    C: Cost<L::Output>,
{
    pub fn with_optimizer(network: &'a mut Network<I, L>, cost: C, optimizer: &O) -> Self {
        let accumulators = network.layers().accumulators(optimizer);
        Self { network, accumulators, cost }
    }

    /// Accumulates the gradient for one sample (or one batch laid out in columns).
    /// # Returns
    /// The error propagated past the first layer.
    pub fn train(&mut self, input: &I, expected: &L::Output) -> I {
        self.network.layers().train(&mut self.accumulators, input, expected, &self.cost)
    }

    /// The only place parameters change.
    pub fn update(&mut self, learn_rate: I::Scalar) {
        self.network.layers_mut().update(&mut self.accumulators, learn_rate);
    }

    /// Cost of the current parameters on one sample.
    pub fn cost(&self, input: &I, expected: &L::Output) -> <L::Output as Shaped>::Scalar
    where
        L::Output: Shaped,
    {
        self.cost.calc(&self.network.forward(input), expected)
    }

    pub fn network(&self) -> &Network<I, L> {
        &*self.network
    }

    pub fn accumulators(&self) -> &L::Accumulators {
        &self.accumulators
    }
}
