use crate::geoalg::{element::Element, matrix::{Matrix, Shaped}};

/// Compares a prediction against the expected output.
pub trait Cost<M> {
    /// Scalar cost of `output`.
    fn calc(&self, output: &M, expected: &M) -> M::Scalar
    where
        M: Shaped;

    /// Derivative of the cost with respect to `output`, the error fed into backpropagation.
    fn derive(&self, output: &M, expected: &M) -> M;
}

/// Half the squared error, averaged over the batch columns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeanSquaredError;

impl<const R: usize, const C: usize, T: Element> Cost<Matrix<R, C, T>> for MeanSquaredError {
    fn calc(&self, output: &Matrix<R, C, T>, expected: &Matrix<R, C, T>) -> <Matrix<R, C, T> as Shaped>::Scalar {
        let diff = *output - *expected;
        diff.mul_element_wise(&diff).sum() / T::from_usize(2 * C)
    }

    fn derive(&self, output: &Matrix<R, C, T>, expected: &Matrix<R, C, T>) -> Matrix<R, C, T> {
        let columns = T::from_usize(C);
        (*output - *expected).map(|x| x / columns)
    }
}

/// Absolute error averaged over every element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeanAbsoluteError;

impl<const R: usize, const C: usize, T: Element> Cost<Matrix<R, C, T>> for MeanAbsoluteError {
    fn calc(&self, output: &Matrix<R, C, T>, expected: &Matrix<R, C, T>) -> <Matrix<R, C, T> as Shaped>::Scalar {
        let total = (*output - *expected)
            .map(|x| if x < T::ZERO { T::ZERO - x } else { x })
            .sum();
        total / T::from_usize(R * C)
    }

    fn derive(&self, output: &Matrix<R, C, T>, expected: &Matrix<R, C, T>) -> Matrix<R, C, T> {
        let count = T::from_usize(R * C);
        (*output - *expected).map(|x| {
            if x > T::ZERO {
                T::ONE / count
            } else if x < T::ZERO {
                (T::ZERO - T::ONE) / count
            } else {
                T::ZERO
            }
        })
    }
}
