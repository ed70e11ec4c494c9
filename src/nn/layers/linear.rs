use rand::Rng;

use crate::geoalg::{element::Element, matrix::{Matrix, Vector}};
use crate::prettify::print_labeled;

use super::{Learnable, Propagates};

/// A fully connected layer computing `weights * input + bias`.
/// Accepts a batch of `B` samples laid out as the columns of an `IN x B` matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Linear<const IN: usize, const OUT: usize, T = f32> {
    weights: Matrix<OUT, IN, T>,
    bias: Vector<OUT, T>,
}

impl<const IN: usize, const OUT: usize, T: Element> Linear<IN, OUT, T> {
    pub const fn new(weights: Matrix<OUT, IN, T>, bias: Vector<OUT, T>) -> Self {
        Self { weights, bias }
    }

    /// Weights listed row by row (one row per output), followed by one bias per output.
    pub fn from_flat<const N: usize>(weights: [T; N], bias: [T; OUT]) -> Self {
        Self::new(Matrix::from_flat(weights), Matrix::column_vector(bias))
    }

    pub fn zeroed() -> Self {
        Self::new(Matrix::zeroed(), Matrix::zeroed())
    }

    /// Returns a layer initialized from the thread generator.
    pub fn new_randomized() -> Self {
        let mut layer = Self::zeroed();
        layer.init(&mut rand::thread_rng());
        layer
    }

    pub fn weights(&self) -> &Matrix<OUT, IN, T> {
        &self.weights
    }

    pub fn bias(&self) -> &Vector<OUT, T> {
        &self.bias
    }

    pub fn set_weights(&mut self, weights: Matrix<OUT, IN, T>) -> &mut Self {
        self.weights = weights;
        self
    }

    pub fn set_bias(&mut self, bias: Vector<OUT, T>) -> &mut Self {
        self.bias = bias;
        self
    }

    /// Weights and bias side by side as one `OUT x (IN + 1)` matrix. `P` must be `IN + 1`.
    pub fn parameters<const P: usize>(&self) -> Matrix<OUT, P, T> {
        self.weights.column_cat(&self.bias)
    }

    /// Inverse of `parameters`.
    pub fn set_parameters<const P: usize>(&mut self, combined: &Matrix<OUT, P, T>) -> &mut Self {
        let (weights, bias) = combined.column_split::<IN, 1>();
        self.weights = weights;
        self.bias = bias;
        self
    }
}

impl<const IN: usize, const OUT: usize, T: Element> Default for Linear<IN, OUT, T> {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl<const IN: usize, const OUT: usize, T: Element> Learnable for Linear<IN, OUT, T> {
    /// Weight gradient and bias gradient, the two column blocks of the combined parameter matrix.
    type Gradient = (Matrix<OUT, IN, T>, Vector<OUT, T>);

    fn init<G: Rng + ?Sized>(&mut self, rng: &mut G) {
        self.weights.randomize_with(rng);
        self.bias.randomize_with(rng);
    }

    fn apply_gradient(&mut self, (weights, bias): &Self::Gradient) {
        self.weights -= *weights;
        self.bias -= *bias;
    }

    fn print(&self) {
        print_labeled("WEIGHTS:", &self.weights);
        print_labeled("BIAS:", &self.bias);
    }
}

impl<const IN: usize, const OUT: usize, const B: usize, T: Element> Propagates<Matrix<IN, B, T>> for Linear<IN, OUT, T> {
    type Output = Matrix<OUT, B, T>;

    fn forward(&self, input: &Matrix<IN, B, T>) -> Matrix<OUT, B, T> {
        self.weights.matmul(input).add_wrapped(&self.bias)
    }

    fn backward(&self, _input: &Matrix<IN, B, T>, next_error: &Matrix<OUT, B, T>) -> Matrix<IN, B, T> {
        self.weights.transpose().matmul(next_error)
    }

    /// Weight gradient is `next_error * inputᵗ`; bias gradient sums the error over the batch.
    fn calc_gradient(&self, input: &Matrix<IN, B, T>, next_error: &Matrix<OUT, B, T>) -> Self::Gradient {
        let weights = next_error.matmul(&input.transpose());
        let bias = next_error.matmul(&Vector::<B, T>::filled(T::ONE));
        (weights, bias)
    }
}
