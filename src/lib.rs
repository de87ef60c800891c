//! Fixed-step numerical integration and a concurrent job session around it
//!
//! - [`function`]: the bounded scalar function capability plus built-ins
//! - [`integration`]: trapezoidal quadrature and the adaptive step search
//! - [`jobs`]: job descriptors and the shared single-job slot
//! - [`sync`]: reader/writer semaphore and cooperative cancellation
//! - [`session`]: producer, consumer and the coordinator that runs them

pub mod function;
pub mod integration;
pub mod jobs;
pub mod session;
pub mod sync;

pub use function::{BoundedFunction, Exp, FnFunction, Log};
pub use integration::{IntegrationError, find_optimal_step, integrate};
pub use jobs::{Job, JobSlot, SyncMode, Task};
pub use session::{SessionConfig, SessionReport, run_session};
pub use sync::{CancelToken, RwSemaphore};
