//! Adaptive step search (Runge-style halving)
//!
//! Starting from an initial step `h`, the search compares `I(h)` with
//! `I(h/2)` and keeps halving until the two estimates differ by less than the
//! target accuracy. The difference is only a convergence proxy: it does not
//! bound the error against the exact integral.

use crate::function::BoundedFunction;
use crate::integration::error::IntegrationError;
use crate::integration::quadrature::{integrate, validate_interval, validate_step};

/// Configuration for the adaptive step search
#[derive(Debug, Clone)]
pub struct StepSearchConfig {
    /// Maximum number of times the step may be halved before giving up
    pub max_halvings: u32,
}

impl Default for StepSearchConfig {
    fn default() -> Self {
        Self { max_halvings: 40 }
    }
}

impl StepSearchConfig {
    pub fn with_max_halvings(mut self, max_halvings: u32) -> Self {
        self.max_halvings = max_halvings;
        self
    }
}

/// Outcome of a successful step search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSearchResult {
    /// The step that met the stopping rule
    pub step: f64,
    /// `I(step)`
    pub estimate: f64,
    /// `I(step / 2)`
    pub refined_estimate: f64,
    /// How many times the initial step was halved
    pub halvings: u32,
}

impl StepSearchResult {
    /// Difference between the two last estimates
    pub fn difference(&self) -> f64 {
        (self.estimate - self.refined_estimate).abs()
    }
}

/// Find a step for which `|I(h) - I(h/2)| < target_accuracy`
///
/// Uses the default [`StepSearchConfig`].
pub fn find_optimal_step<F>(
    f: &F,
    left: f64,
    right: f64,
    target_accuracy: f64,
    initial_step: f64,
) -> Result<f64, IntegrationError>
where
    F: BoundedFunction + ?Sized,
{
    search_step(
        f,
        left,
        right,
        target_accuracy,
        initial_step,
        &StepSearchConfig::default(),
    )
    .map(|result| result.step)
}

/// Run the step search with an explicit configuration
pub fn search_step<F>(
    f: &F,
    left: f64,
    right: f64,
    target_accuracy: f64,
    initial_step: f64,
    config: &StepSearchConfig,
) -> Result<StepSearchResult, IntegrationError>
where
    F: BoundedFunction + ?Sized,
{
    if !target_accuracy.is_finite() || target_accuracy <= 0.0 {
        return Err(IntegrationError::invalid(format!(
            "target accuracy must be positive and finite (got {})",
            target_accuracy
        )));
    }
    validate_interval(f, left, right)?;
    validate_step(initial_step)?;

    let mut step = initial_step;
    let mut estimate = integrate(f, left, right, step)?;
    let mut halvings = 0;

    loop {
        let refined_estimate = match integrate(f, left, right, step / 2.0) {
            Ok(value) => value,
            // The halved step is below what the engine will evaluate
            Err(IntegrationError::InvalidArgument { .. }) => {
                return Err(IntegrationError::NonConvergence {
                    halvings,
                    last_step: step,
                });
            }
            Err(e) => return Err(e),
        };

        let difference = (estimate - refined_estimate).abs();
        if difference < target_accuracy {
            return Ok(StepSearchResult {
                step,
                estimate,
                refined_estimate,
                halvings,
            });
        }
        // Halving cannot repair a NaN difference
        if difference.is_nan() || halvings == config.max_halvings {
            return Err(IntegrationError::NonConvergence {
                halvings,
                last_step: step,
            });
        }

        step /= 2.0;
        estimate = refined_estimate;
        halvings += 1;
    }
}
