//! Job descriptor: one unit of integration work

use crate::function::BoundedFunction;
use crate::integration::{IntegrationError, integrate};
use std::fmt;
use std::sync::Arc;

/// A function plus the bounds and step to integrate it with
///
/// Cloning a job is cheap: the function is shared, never copied. A clone
/// taken under the slot's lock is the job snapshot handed to the consumer.
#[derive(Clone)]
pub struct Job {
    pub function: Arc<dyn BoundedFunction>,
    pub left: f64,
    pub right: f64,
    pub step: f64,
}

impl Job {
    pub fn new(function: Arc<dyn BoundedFunction>, left: f64, right: f64, step: f64) -> Self {
        Self {
            function,
            left,
            right,
            step,
        }
    }

    /// Run the integration this job describes
    pub fn integrate(&self) -> Result<f64, IntegrationError> {
        integrate(self.function.as_ref(), self.left, self.right, self.step)
    }

    /// Check the descriptor invariants without integrating
    pub fn is_well_formed(&self) -> bool {
        self.left < self.right
            && self.step > 0.0
            && self.function.contains_interval(self.left, self.right)
    }
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job")
            .field("function", &self.function.name())
            .field("left", &self.left)
            .field("right", &self.right)
            .field("step", &self.step)
            .finish()
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} on [{:.4}, {:.4}] step {:.4}",
            self.function.name(),
            self.left,
            self.right,
            self.step
        )
    }
}
