//! Synchronization primitives used by the job session
//!
//! - [`RwSemaphore`]: reader/writer semaphore with writer preference
//! - [`SemaphoreLock`]: a value that is only reachable through the semaphore
//! - [`CancelToken`]: cooperative cancellation with interruptible sleeps

pub mod cancel;
pub mod lock;
pub mod semaphore;

pub use cancel::CancelToken;
pub use lock::{SemaphoreLock, SemaphoreReadGuard, SemaphoreWriteGuard};
pub use semaphore::{ReadGuard, RwSemaphore, WriteGuard};
