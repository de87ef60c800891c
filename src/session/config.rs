//! Configuration for a producer/consumer session

use crate::jobs::SyncMode;
use crate::session::error::SessionError;
use std::time::Duration;

/// Half-open ranges the default sampler draws job parameters from
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingRange {
    /// Logarithm base
    pub base: (f64, f64),
    /// Left integration bound
    pub left: (f64, f64),
    /// Right integration bound
    pub right: (f64, f64),
    /// Integration step
    pub step: (f64, f64),
}

impl Default for SamplingRange {
    fn default() -> Self {
        Self {
            base: (2.0, 100.0),
            left: (1.0, 100.0),
            right: (100.0, 200.0),
            step: (0.01, 1.0),
        }
    }
}

impl SamplingRange {
    pub fn with_base(mut self, low: f64, high: f64) -> Self {
        self.base = (low, high);
        self
    }

    pub fn with_left(mut self, low: f64, high: f64) -> Self {
        self.left = (low, high);
        self
    }

    pub fn with_right(mut self, low: f64, high: f64) -> Self {
        self.right = (low, high);
        self
    }

    pub fn with_step(mut self, low: f64, high: f64) -> Self {
        self.step = (low, high);
        self
    }

    /// Check that every range is non-empty and that sampled jobs are valid
    ///
    /// Sampled jobs always integrate a logarithm, so bounds must stay
    /// non-negative, the base must stay above one and every left bound must
    /// be below every right bound.
    pub fn validate(&self) -> Result<(), SessionError> {
        for (name, (low, high)) in [
            ("base", self.base),
            ("left", self.left),
            ("right", self.right),
            ("step", self.step),
        ] {
            if !low.is_finite() || !high.is_finite() || low >= high {
                return Err(SessionError::InvalidRange { name, low, high });
            }
        }

        if self.base.0 <= 1.0 {
            return Err(SessionError::InvalidConfig(format!(
                "logarithm base must stay above 1 (range starts at {})",
                self.base.0
            )));
        }
        if self.left.0 < 0.0 {
            return Err(SessionError::InvalidConfig(format!(
                "left bound range starts at {}, outside the logarithm domain",
                self.left.0
            )));
        }
        if self.left.1 > self.right.0 {
            return Err(SessionError::InvalidConfig(format!(
                "left bound range [{}, {}) overlaps right bound range [{}, {})",
                self.left.0, self.left.1, self.right.0, self.right.1
            )));
        }
        if self.step.0 <= 0.0 {
            return Err(SessionError::InvalidConfig(format!(
                "step range must be positive (starts at {})",
                self.step.0
            )));
        }
        Ok(())
    }
}

/// Configuration for one producer/consumer session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Number of jobs the producer publishes and the consumer reads
    pub job_count: usize,
    /// How the shared slot is synchronized
    pub sync_mode: SyncMode,
    /// Seed for the job sampler (None = seed from the OS)
    pub seed: Option<u64>,
    /// Consumer sleep after finding the slot empty
    pub idle_delay: Duration,
    /// Consumer sleep after each computed result
    pub pace_delay: Duration,
    /// Producer sleep after each publish (None = publish as fast as possible)
    pub producer_delay: Option<Duration>,
    /// Cancel both workers once this much time has passed
    pub timeout: Option<Duration>,
    /// Ranges for randomly generated jobs
    pub sampling: SamplingRange,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            job_count: 100,
            sync_mode: SyncMode::default(),
            seed: None,
            idle_delay: Duration::from_millis(1),
            pace_delay: Duration::from_millis(10),
            producer_delay: None,
            timeout: None,
            sampling: SamplingRange::default(),
        }
    }
}

impl SessionConfig {
    pub fn with_job_count(mut self, job_count: usize) -> Self {
        self.job_count = job_count;
        self
    }

    pub fn with_sync_mode(mut self, mode: SyncMode) -> Self {
        self.sync_mode = mode;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_seed_option(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_idle_delay(mut self, delay: Duration) -> Self {
        self.idle_delay = delay;
        self
    }

    pub fn with_pace_delay(mut self, delay: Duration) -> Self {
        self.pace_delay = delay;
        self
    }

    pub fn with_producer_delay(mut self, delay: Duration) -> Self {
        self.producer_delay = Some(delay);
        self
    }

    pub fn with_producer_delay_option(mut self, delay: Option<Duration>) -> Self {
        self.producer_delay = delay;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_timeout_option(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_sampling(mut self, sampling: SamplingRange) -> Self {
        self.sampling = sampling;
        self
    }
}
