//! Job generation for the producer
//!
//! The producer never builds jobs itself; it asks a [`JobSampler`]. Tests
//! inject deterministic samplers, the binary uses [`LogJobSampler`] seeded
//! from the session config so runs can be reproduced.

use crate::function::{BoundedFunction, Log};
use crate::jobs::Job;
use crate::session::config::{SamplingRange, SessionConfig};
use crate::session::error::SessionError;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

/// Source of the jobs a producer publishes
pub trait JobSampler: Send {
    /// Build the next job
    fn sample(&mut self) -> Job;
}

impl<F> JobSampler for F
where
    F: FnMut() -> Job + Send,
{
    fn sample(&mut self) -> Job {
        self()
    }
}

/// Random logarithm jobs drawn from a [`SamplingRange`]
#[derive(Debug, Clone)]
pub struct LogJobSampler {
    rng: ChaCha8Rng,
    range: SamplingRange,
}

impl LogJobSampler {
    /// Create a sampler; `seed` of `None` seeds from the OS
    pub fn new(range: SamplingRange, seed: Option<u64>) -> Result<Self, SessionError> {
        range.validate()?;
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        };
        Ok(Self { rng, range })
    }

    /// Create a sampler from a session's sampling range and seed
    pub fn from_config(config: &SessionConfig) -> Result<Self, SessionError> {
        Self::new(config.sampling.clone(), config.seed)
    }

    fn draw(&mut self, (low, high): (f64, f64)) -> f64 {
        self.rng.random_range(low..high)
    }
}

impl JobSampler for LogJobSampler {
    fn sample(&mut self) -> Job {
        let base = self.draw(self.range.base);
        let function: Arc<dyn BoundedFunction> = match Log::new(base) {
            Some(log) => Arc::new(log),
            // Unreachable with a validated range
            None => Arc::new(Log::natural()),
        };
        let left = self.draw(self.range.left);
        let right = self.draw(self.range.right);
        let step = self.draw(self.range.step);
        Job::new(function, left, right, step)
    }
}
