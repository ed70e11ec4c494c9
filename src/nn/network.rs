use std::marker::PhantomData;

use rand::Rng;

use super::layers::Propagates;

/// A statically typed chain of layers, written as nested pairs `(first, (second, ()))`.
/// The chain only implements `Chain<I>` when every layer's output type is the next layer's input type,
/// so a mismatched network does not compile.
pub trait Chain<I> {
    type Output;

    /// Number of layers in the chain.
    const LEN: usize;

    fn forward(&self, input: &I) -> Self::Output;

    fn init<G: Rng + ?Sized>(&mut self, rng: &mut G);

    fn print(&self);
}

impl<I: Clone> Chain<I> for () {
    type Output = I;
    const LEN: usize = 0;

    fn forward(&self, input: &I) -> I {
        input.clone()
    }

    fn init<G: Rng + ?Sized>(&mut self, _rng: &mut G) {}

    fn print(&self) {}
}

impl<I, H, Tail> Chain<I> for (H, Tail)
where
    H: Propagates<I>,
    Tail: Chain<H::Output>,
{
    type Output = Tail::Output;
    const LEN: usize = Tail::LEN + 1;

    fn forward(&self, input: &I) -> Self::Output {
        self.1.forward(&self.0.forward(input))
    }

    fn init<G: Rng + ?Sized>(&mut self, rng: &mut G) {
        self.0.init(rng);
        self.1.init(rng);
    }

    fn print(&self) {
        self.0.print();
        self.1.print();
    }
}

/// Builds the nested pair representation of a layer chain.
#[macro_export]
macro_rules! layers {
    () => { () };
    ($head:expr $(, $tail:expr)* $(,)?) => {
        ($head, $crate::layers!($($tail),*))
    };
}

/// Builds a [`Network`](crate::nn::network::Network) from a list of layers.
///
/// ```
/// use fixednn::{network, Matrix, Vector};
/// use fixednn::nn::layers::{activation::Relu, linear::Linear};
/// use fixednn::nn::network::Network;
///
/// let network: Network<Vector<2, i32>, _> = network![
///     Linear::<2, 3, i32>::from_flat([1, 2, 3, 4, 5, 6], [2, 3, 4]),
///     Relu::<i32>::relu(),
/// ];
/// assert_eq!(network.forward(&Matrix::column_vector([1, 0])), Matrix::column_vector([3, 6, 9]));
/// ```
///
/// Adjacent layers whose shapes disagree are rejected at compile time:
///
/// ```compile_fail
/// use fixednn::{network, Vector};
/// use fixednn::nn::layers::linear::Linear;
/// use fixednn::nn::network::Network;
///
/// let network: Network<Vector<2>, _> = network![Linear::<2, 3>::zeroed(), Linear::<4, 1>::zeroed()];
/// ```
#[macro_export]
macro_rules! network {
    ($($layer:expr),* $(,)?) => {
        $crate::nn::network::Network::new($crate::layers!($($layer),*))
    };
}

/// Owns an ordered chain of layers taking `I` as input.
/// The structure is fixed once built; only the layers' parameters change during training.
#[derive(Clone, Debug)]
pub struct Network<I, L> {
    layers: L,
    _input: PhantomData<fn(&I)>,
}

impl<I, L: Chain<I>> Network<I, L> {
    pub fn new(layers: L) -> Self {
        Self { layers, _input: PhantomData }
    }

    /// Applies every layer left to right.
    pub fn forward(&self, input: &I) -> L::Output {
        self.layers.forward(input)
    }

    /// Reinitializes every layer from the thread generator.
    pub fn init(&mut self) {
        self.init_with(&mut rand::thread_rng());
    }

    pub fn init_with<G: Rng + ?Sized>(&mut self, rng: &mut G) {
        self.layers.init(rng);
    }

    pub fn layers(&self) -> &L {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut L {
        &mut self.layers
    }

    pub fn len(&self) -> usize {
        L::LEN
    }

    pub fn is_empty(&self) -> bool {
        L::LEN == 0
    }

    /// Prints the parameters of every layer.
    pub fn print(&self) {
        self.layers.print();
    }
}
