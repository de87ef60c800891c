//! Errors that prevent a session from starting or finishing

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    /// A sampling range is empty or not finite
    #[error("Invalid sampling range for {name}: [{low}, {high})")]
    InvalidRange {
        name: &'static str,
        low: f64,
        high: f64,
    },

    /// The configuration would produce jobs that violate their invariants
    #[error("Invalid session config: {0}")]
    InvalidConfig(String),

    /// A worker thread panicked before reporting
    #[error("{worker} worker panicked")]
    WorkerPanicked { worker: &'static str },
}
