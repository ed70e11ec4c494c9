use crate::geoalg::element::Element;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LearningRate<T = f32> {
    rate: T,
    decay: T,
}

impl<T: Element> LearningRate<T> {
    /// Starting point for the learning rate. Stays constant unless a decay is set.
    pub fn new(rate: T) -> Self {
        Self { rate, decay: T::ONE }
    }

    /// Multiplies the rate by `decay` after every epoch.
    pub fn with_decay(rate: T, decay: T) -> Self {
        Self { rate, decay }
    }

    /// Return the current learning rate.
    pub fn rate(&self) -> T {
        self.rate
    }

    pub fn decay_factor(&self) -> T {
        self.decay
    }

    /// Advances to the next epoch's rate.
    pub fn step(&mut self) -> T {
        self.rate = self.rate * self.decay;
        self.rate
    }
}
