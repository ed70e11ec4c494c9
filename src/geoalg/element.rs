use std::fmt::{Debug, Display};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Scalar type a matrix can hold.
/// Implemented for the integer types used in exact tests and the float types used for training.
pub trait Element:
    Copy
    + Debug
    + Display
    + Default
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + AddAssign
    + SubAssign
{
    const ZERO: Self;
    const ONE: Self;

    fn from_usize(n: usize) -> Self;

    /// Lossy for integer types (truncates toward zero).
    fn from_f64(x: f64) -> Self;
}

/// Elements that support the transcendental functions smooth activations need.
pub trait Real: Element + Neg<Output = Self> {
    fn tanh(self) -> Self;
    fn exp(self) -> Self;
}

macro_rules! impl_element {
    ($($t:ty),*) => {
        $(
            impl Element for $t {
                const ZERO: Self = 0 as $t;
                const ONE: Self = 1 as $t;

                fn from_usize(n: usize) -> Self { n as $t }

                fn from_f64(x: f64) -> Self { x as $t }
            }
        )*
    };
}

macro_rules! impl_real {
    ($($t:ty),*) => {
        $(
            impl Real for $t {
                fn tanh(self) -> Self { <$t>::tanh(self) }

                fn exp(self) -> Self { <$t>::exp(self) }
            }
        )*
    };
}

impl_element!(i32, i64, f32, f64);
impl_real!(f32, f64);
