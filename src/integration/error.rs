//! Error type for the integration engine

/// Errors returned by [`integrate`](crate::integration::integrate) and
/// [`find_optimal_step`](crate::integration::find_optimal_step)
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntegrationError {
    /// A parameter is out of range: non-positive step or accuracy,
    /// `left >= right`, or a non-finite value.
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// The integration interval is not inside the function's domain.
    #[error(
        "Interval [{left}, {right}] lies outside the function domain [{domain_left}, {domain_right}]"
    )]
    Domain {
        left: f64,
        right: f64,
        domain_left: f64,
        domain_right: f64,
    },

    /// The integrand produced an infinite or NaN sum, typically a
    /// singularity at a border the domain includes.
    #[error("Integral over [{left}, {right}] with step {step} is not finite")]
    NonFinite { left: f64, right: f64, step: f64 },

    /// The adaptive step search gave up before meeting the target accuracy.
    #[error("Step search did not converge after {halvings} halvings (last step {last_step:e})")]
    NonConvergence { halvings: u32, last_step: f64 },
}

impl IntegrationError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        IntegrationError::InvalidArgument {
            reason: reason.into(),
        }
    }
}
