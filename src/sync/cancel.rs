//! Cooperative cancellation shared between the coordinator and the workers

use parking_lot::{Condvar, Mutex};
use std::sync::{Arc, Weak};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct CancelState {
    cancelled: AtomicBool,
    lock: Mutex<()>,
    wake: Condvar,
    children: Mutex<Vec<Weak<CancelState>>>,
}

/// Cloneable cancellation flag with an interruptible sleep
///
/// Clones share the same flag. Cancelling wakes every thread currently
/// inside [`CancelToken::sleep`] and cancels every child token.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<CancelState>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a token that is cancelled along with this one
    ///
    /// Cancelling the child leaves this token untouched.
    pub fn child_token(&self) -> CancelToken {
        let child = CancelToken::new();
        let mut children = self.inner.children.lock();
        // Checked under the children lock so a concurrent `cancel` either
        // sees the new child or is seen here
        if self.is_cancelled() {
            drop(children);
            child.cancel();
        } else {
            children.retain(|c| c.strong_count() > 0);
            children.push(Arc::downgrade(&child.inner));
        }
        child
    }

    /// Signal cancellation to every holder of this token
    pub fn cancel(&self) {
        {
            let _lock = self.inner.lock.lock();
            self.inner.cancelled.store(true, Ordering::SeqCst);
            self.inner.wake.notify_all();
        }

        let children = std::mem::take(&mut *self.inner.children.lock());
        for inner in children.iter().filter_map(Weak::upgrade) {
            CancelToken { inner }.cancel();
        }
    }

    /// Check if cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Sleep for `duration` unless cancelled first
    ///
    /// Returns `true` if the full duration elapsed, `false` if the token was
    /// (or became) cancelled.
    pub fn sleep(&self, duration: Duration) -> bool {
        let deadline = Instant::now() + duration;
        let mut lock = self.inner.lock.lock();
        while !self.is_cancelled() {
            if self.inner.wake.wait_until(&mut lock, deadline).timed_out() {
                return !self.is_cancelled();
            }
        }
        false
    }
}
