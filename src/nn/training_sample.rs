use crate::geoalg::{element::Element, matrix::{Matrix, Vector}};

/// One input paired with the output the network should produce for it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrainingSample<const IN: usize, const OUT: usize, T = f32> {
    input: Vector<IN, T>,
    expected: Vector<OUT, T>,
}

impl<const IN: usize, const OUT: usize, T: Element> TrainingSample<IN, OUT, T> {
    pub const fn new(input: Vector<IN, T>, expected: Vector<OUT, T>) -> Self {
        Self { input, expected }
    }

    pub fn from_arrays(input: [T; IN], expected: [T; OUT]) -> Self {
        Self::new(Matrix::column_vector(input), Matrix::column_vector(expected))
    }

    pub fn input(&self) -> &Vector<IN, T> {
        &self.input
    }

    pub fn expected(&self) -> &Vector<OUT, T> {
        &self.expected
    }
}
