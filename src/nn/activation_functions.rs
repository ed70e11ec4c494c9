use crate::geoalg::element::{Element, Real};

/// Scalar nonlinearity with its derivative.
pub trait ActivationFunction<T> {
    fn apply(&self, x: T) -> T;

    /// Derivative evaluated at the raw input `x`, not at `apply(x)`.
    fn derive(&self, x: T) -> T;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TanhFunction;

impl<T: Real> ActivationFunction<T> for TanhFunction {
    fn apply(&self, x: T) -> T {
        x.tanh()
    }

    fn derive(&self, x: T) -> T {
        let fx = self.apply(x);
        T::ONE - fx * fx
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SigmoidFunction;

impl<T: Real> ActivationFunction<T> for SigmoidFunction {
    fn apply(&self, x: T) -> T {
        T::ONE / (T::ONE + (-x).exp())
    }

    fn derive(&self, x: T) -> T {
        let fx = self.apply(x);
        fx * (T::ONE - fx)
    }
}

/// `x` for positive inputs, `alpha * x` otherwise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LeakyReluFunction<T = f32> {
    alpha: T,
}

impl<T: Element> LeakyReluFunction<T> {
    /// Slope `alpha` must be non-negative.
    pub fn new(alpha: T) -> Self {
        debug_assert!(alpha >= T::ZERO, "leaky relu slope must be non-negative, got {alpha}");
        Self { alpha }
    }

    pub fn relu() -> Self {
        Self { alpha: T::ZERO }
    }

    pub fn alpha(&self) -> T {
        self.alpha
    }
}

impl<T: Element> Default for LeakyReluFunction<T> {
    fn default() -> Self {
        Self::new(T::from_f64(0.01))
    }
}

impl<T: Element> ActivationFunction<T> for LeakyReluFunction<T> {
    fn apply(&self, x: T) -> T {
        if x > T::ZERO { x } else { self.alpha * x }
    }

    fn derive(&self, x: T) -> T {
        if x > T::ZERO { T::ONE } else { self.alpha }
    }
}

/// `max(x, 0)`, a leaky relu whose slope is pinned to zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReluFunction<T = f32>(LeakyReluFunction<T>);

impl<T: Element> ReluFunction<T> {
    pub fn new() -> Self {
        Self(LeakyReluFunction::relu())
    }
}

impl<T: Element> Default for ReluFunction<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> ActivationFunction<T> for ReluFunction<T> {
    fn apply(&self, x: T) -> T {
        self.0.apply(x)
    }

    fn derive(&self, x: T) -> T {
        self.0.derive(x)
    }
}
