use rand::Rng;

use crate::error::{Error, Result};
use crate::geoalg::{element::Element, matrix::Vector};
use crate::prettify::{BRIGHT_YELLOW, DIM, RESET};
use crate::statistics::sample::Sample;
use crate::timed::TimedContext;

use super::backprop::{Backprop, Backpropagate};
use super::cost_functions::Cost;
use super::learning_rate::LearningRate;
use super::training_sample::TrainingSample;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrainingHyperParameters<T = f32> {
    pub total_epochs: usize,
    pub batch_size: usize,
    pub learning_rate: LearningRate<T>,
    /// Prints progress every this many epochs; 0 keeps training quiet.
    pub report_every: usize,
}

impl<T: Element> TrainingHyperParameters<T> {
    pub fn validate(&self) -> Result<()> {
        if self.total_epochs == 0 {
            return Err(Error::InvalidConfig("total_epochs must be at least 1".to_string()));
        }

        if self.batch_size == 0 {
            return Err(Error::InvalidConfig("batch_size must be at least 1".to_string()));
        }

        let rate = self.learning_rate.rate();
        if !(rate > T::ZERO) {
            return Err(Error::InvalidConfig(format!("learning rate must be positive, got {rate}")));
        }

        let decay = self.learning_rate.decay_factor();
        if !(decay > T::ZERO && decay <= T::ONE) {
            return Err(Error::InvalidConfig(format!("learning rate decay must be in (0, 1], got {decay}")));
        }

        Ok(())
    }
}

impl<T: Element> Default for TrainingHyperParameters<T> {
    fn default() -> Self {
        Self {
            total_epochs: 100,
            batch_size: 1,
            learning_rate: LearningRate::new(T::from_f64(0.01)),
            report_every: 0,
        }
    }
}

/// Outcome of one pass over the training data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EpochStats<T = f32> {
    pub epoch: usize,
    /// Mean cost over every sample after the epoch's updates.
    pub loss: T,
    pub seconds: f32,
}

/// Trains on `samples` in random mini-batches.
/// Every batch is accumulated with `train` and applied with a single `update`.
/// # Arguments
/// # Returns
/// Stats for every epoch, in order.
pub fn train_network<const IN: usize, const OUT: usize, T, L, C, O, G>(
    backprop: &mut Backprop<'_, Vector<IN, T>, L, C, O>,
    samples: &[TrainingSample<IN, OUT, T>],
    tp: &TrainingHyperParameters<T>,
    rng: &mut G,
) -> Result<Vec<EpochStats<T>>>
where
    T: Element,
    L: Backpropagate<Vector<IN, T>, O, Output = Vector<OUT, T>>,
    C: Cost<Vector<OUT, T>>,
    G: Rng + ?Sized,
{
    tp.validate()?;
    if samples.is_empty() {
        return Err(Error::EmptyDataset);
    }

    let mut learning_rate = tp.learning_rate;
    let mut sample = Sample::create_sample(samples.iter().collect());
    let mut timer = TimedContext::new();
    let mut history = Vec::with_capacity(tp.total_epochs);

    for epoch in 1..=tp.total_epochs {
        sample.reset();

        loop {
            let batch = sample.random_batch(tp.batch_size, rng);
            if batch.is_empty() {
                break;
            }

            for datum in batch {
                backprop.train(datum.input(), datum.expected());
            }
            backprop.update(learning_rate.rate());
        }

        let total = samples
            .iter()
            .fold(T::ZERO, |total, datum| total + backprop.cost(datum.input(), datum.expected()));
        let loss = total / T::from_usize(samples.len());
        let seconds = timer.checkpoint();

        if tp.report_every > 0 && epoch % tp.report_every == 0 {
            println!("Epoch # {epoch:4} | {BRIGHT_YELLOW}Loss: {loss:.6}{RESET} | {DIM}{seconds:.3}s{RESET}");
        }

        history.push(EpochStats { epoch, loss, seconds });
        learning_rate.step();
    }

    Ok(history)
}
