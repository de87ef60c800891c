//! Numerical integration engine
//!
//! - [`integrate`]: fixed-step trapezoidal quadrature over `[left, right]`
//! - [`find_optimal_step`]: halves an initial step until successive estimates
//!   agree to within a target accuracy
//! - [`convergence_table`]: integrates with several steps and compares each
//!   estimate with the exact integral, when the function knows it

pub mod error;
pub mod quadrature;
pub mod step_search;

pub use error::IntegrationError;
pub use quadrature::{MAX_SEGMENTS, integrate, segment_count};
pub use step_search::{StepSearchConfig, StepSearchResult, find_optimal_step, search_step};

use crate::function::BoundedFunction;

/// One line of a convergence table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceRow {
    pub step: f64,
    pub value: f64,
    /// Absolute error against the exact integral
    pub error: Option<f64>,
    /// Error relative to the magnitude of the exact integral
    pub relative_error: Option<f64>,
}

/// Integrate `f` with every step in `steps`
pub fn convergence_table<F>(
    f: &F,
    left: f64,
    right: f64,
    steps: &[f64],
) -> Result<Vec<ConvergenceRow>, IntegrationError>
where
    F: BoundedFunction + ?Sized,
{
    let exact = f.exact_integral(left, right);

    steps
        .iter()
        .map(|&step| {
            let value = integrate(f, left, right, step)?;
            let error = exact.map(|e| (value - e).abs());
            let relative_error = exact
                .zip(error)
                .filter(|(e, _)| *e != 0.0)
                .map(|(e, err)| err / e.abs());
            Ok(ConvergenceRow {
                step,
                value,
                error,
                relative_error,
            })
        })
        .collect()
}
