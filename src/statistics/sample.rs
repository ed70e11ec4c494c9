use rand::Rng;

pub struct Sample<T> {
    all_samples: Vec<T>,
    unused: Vec<usize>,
    used: Vec<usize>,
}

impl<T> Sample<T> {
    /// Creates a sample of data from specified vector.
    /// Make sure to move the data into sample for it to be consumed.
    /// Requires no expensive shuffling up front; batches are drawn at random instead.
    pub fn create_sample(data: Vec<T>) -> Sample<T> {
        let unused = (0..data.len()).collect();
        let used = Vec::with_capacity(data.len());
        let all_samples = data;

        Sample {
            all_samples,
            unused,
            used
        }
    }

    /// Creates a random batch from sample data.
    /// Repeated calls to random_batch are guaranteed to never use the same element more than once before call to reset.
    /// Once the sample is exhausted the batch comes back empty until reset is called.
    pub fn random_batch<G: Rng + ?Sized>(&mut self, requested_batch_size: usize, rng: &mut G) -> Vec<&T> {
        // Ensure batch size picks up stragglers
        let batch_size = std::cmp::min(requested_batch_size, self.unused.len());

        let mut newbatch = Vec::with_capacity(batch_size);
        for _ in 0..batch_size {
            let unused_index = rng.gen_range(0..self.unused.len());
            let index_to_use = self.unused.swap_remove(unused_index);
            self.used.push(index_to_use);

            newbatch.push(&self.all_samples[index_to_use]);
        }

        newbatch
    }

    /// Resets batch sample to allow a fresh series of random batches.
    pub fn reset(&mut self) {
        self.unused.extend(self.used.iter());
        self.used.clear();
    }

    pub fn len(&self) -> usize {
        self.all_samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all_samples.is_empty()
    }

    /// Number of elements not yet handed out since the last reset.
    pub fn remaining(&self) -> usize {
        self.unused.len()
    }
}
