//! Fixed-step frame pacing
//!
//! Accumulates elapsed wall-clock time and hands out whole simulation ticks,
//! capped per frame so a long stall can't trigger a catch-up spiral.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct FixedStep {
    step: Duration,
    max_substeps: u32,
    accumulator: Duration,
}

impl FixedStep {
    pub fn new(step: Duration, max_substeps: u32) -> Self {
        Self {
            step,
            max_substeps: max_substeps.max(1),
            accumulator: Duration::ZERO,
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Add elapsed time and return how many ticks to run now
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            self.accumulator -= self.step;
            substeps += 1;
        }

        // Drop whatever the cap left behind
        if substeps == self.max_substeps && self.accumulator >= self.step {
            log::debug!("Frame budget exceeded, dropping {:?}", self.accumulator);
            self.accumulator = Duration::ZERO;
        }
        substeps
    }

    /// Time left until the next tick is due
    pub fn until_next(&self) -> Duration {
        self.step.saturating_sub(self.accumulator)
    }
}
