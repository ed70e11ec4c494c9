use std::time::Instant;

pub struct TimedContext {
    started: Instant,
    last: Instant,
}

impl TimedContext {
    pub fn new() -> Self {
        let start = Instant::now();
        Self { started: start, last: start }
    }

    /// Seconds since the previous checkpoint, or since creation for the first one.
    pub fn checkpoint(&mut self) -> f32 {
        let new_checkpoint = Instant::now();
        let elapsed = new_checkpoint.duration_since(self.last).as_secs_f32();
        self.last = new_checkpoint;

        elapsed
    }

    /// Seconds since creation.
    pub fn elapsed(&self) -> f32 {
        self.started.elapsed().as_secs_f32()
    }
}

impl Default for TimedContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs `f` and returns its result with the seconds it took.
pub fn timed<R>(f: impl FnOnce() -> R) -> (R, f32) {
    let start = Instant::now();
    let result = f();

    (result, start.elapsed().as_secs_f32())
}

#[cfg(test)]
mod tests {
    use std::{thread, time};

    use super::*;

    #[test]
    fn test_timed() {
        let (value, seconds) = timed(|| {
            thread::sleep(time::Duration::from_millis(50));
            7
        });

        assert_eq!(value, 7);
        assert!(seconds >= 0.05);
    }

    #[test]
    fn test_checkpoints() {
        let mut context = TimedContext::new();
        thread::sleep(time::Duration::from_millis(20));
        let first = context.checkpoint();

        thread::sleep(time::Duration::from_millis(10));
        let second = context.checkpoint();

        assert!(first >= 0.02);
        assert!(second >= 0.01);
        assert!(context.elapsed() >= 0.03);
    }
}
