use crate::geoalg::{element::Element, matrix::Matrix};
use crate::prettify::print_labeled;

use super::{EmptyGradient, Learnable, Propagates};

/// Pass-through layer that dumps every matrix it forwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Print {
    label: &'static str,
}

impl Print {
    pub const fn new(label: &'static str) -> Self {
        Self { label }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl Learnable for Print {
    type Gradient = EmptyGradient;
}

impl<const R: usize, const C: usize, T: Element> Propagates<Matrix<R, C, T>> for Print {
    type Output = Matrix<R, C, T>;

    fn forward(&self, input: &Matrix<R, C, T>) -> Matrix<R, C, T> {
        print_labeled(self.label, input);
        *input
    }

    fn backward(&self, _input: &Matrix<R, C, T>, next_error: &Matrix<R, C, T>) -> Matrix<R, C, T> {
        *next_error
    }

    fn calc_gradient(&self, _input: &Matrix<R, C, T>, _next_error: &Matrix<R, C, T>) -> EmptyGradient {
        EmptyGradient
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_is_transparent() {
        let print = Print::new("hidden");
        let input = Matrix::<2, 1, i32>::column_vector([1, 2]);
        let error = Matrix::<2, 1, i32>::column_vector([-3, 4]);

        assert_eq!(print.label(), "hidden");
        assert_eq!(print.forward(&input), input);
        assert_eq!(print.backward(&input, &error), error);
    }
}
