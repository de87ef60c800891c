//! Reader/writer semaphore guarding the shared job slot
//!
//! A writer excludes every reader and every other writer; readers only
//! exclude writers. Once a writer is waiting, new readers queue behind it so
//! a steady stream of reads cannot starve the producer.
//!
//! The raw `acquire_*`/`release_*` calls are paired by the caller. The
//! [`RwSemaphore::read`] and [`RwSemaphore::write`] guards release on drop
//! and are the preferred entry points. The semaphore also implements
//! [`RawRwLock`], so `lock_api::RwLock` can put data behind it.

use parking_lot::lock_api::{GuardSend, RawRwLock};
use parking_lot::{Condvar, Mutex};

#[derive(Debug, Default)]
struct SemaphoreState {
    /// Readers currently inside their critical section
    active_readers: usize,
    /// Whether a writer currently holds the semaphore
    writer_active: bool,
    /// Writers blocked in `acquire_write`
    waiting_writers: usize,
}

/// Counting reader/writer semaphore with writer preference
#[derive(Debug, Default)]
pub struct RwSemaphore {
    state: Mutex<SemaphoreState>,
    /// Signalled whenever the semaphore may have become available
    available: Condvar,
}

impl RwSemaphore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until read access is granted
    pub fn acquire_read(&self) {
        let mut state = self.state.lock();
        while state.writer_active || state.waiting_writers > 0 {
            self.available.wait(&mut state);
        }
        state.active_readers += 1;
    }

    /// Give back read access obtained with [`acquire_read`](Self::acquire_read)
    pub fn release_read(&self) {
        let mut state = self.state.lock();
        debug_assert!(state.active_readers > 0, "release_read without acquire_read");
        state.active_readers = state.active_readers.saturating_sub(1);
        if state.active_readers == 0 {
            self.available.notify_all();
        }
    }

    /// Block until exclusive write access is granted
    pub fn acquire_write(&self) {
        let mut state = self.state.lock();
        state.waiting_writers += 1;
        while state.writer_active || state.active_readers > 0 {
            self.available.wait(&mut state);
        }
        state.waiting_writers -= 1;
        state.writer_active = true;
    }

    /// Give back write access obtained with [`acquire_write`](Self::acquire_write)
    pub fn release_write(&self) {
        let mut state = self.state.lock();
        debug_assert!(state.writer_active, "release_write without acquire_write");
        state.writer_active = false;
        self.available.notify_all();
    }

    /// Acquire read access for the lifetime of the returned guard
    pub fn read(&self) -> ReadGuard<'_> {
        self.acquire_read();
        ReadGuard { semaphore: self }
    }

    /// Acquire write access for the lifetime of the returned guard
    pub fn write(&self) -> WriteGuard<'_> {
        self.acquire_write();
        WriteGuard { semaphore: self }
    }

    /// Number of writers blocked in [`acquire_write`](Self::acquire_write)
    pub fn waiting_writers(&self) -> usize {
        self.state.lock().waiting_writers
    }

    /// Number of readers currently holding the semaphore
    pub fn active_readers(&self) -> usize {
        self.state.lock().active_readers
    }

    /// Whether a writer currently holds the semaphore
    pub fn is_write_locked(&self) -> bool {
        self.state.lock().writer_active
    }
}

// SAFETY: `acquire_read` admits a reader only while no writer holds the
// semaphore and `acquire_write` waits until no reader or writer holds it, so
// shared and exclusive access never overlap. Nothing is tied to the
// acquiring thread, so guards may be sent.
unsafe impl RawRwLock for RwSemaphore {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = RwSemaphore {
        state: Mutex::new(SemaphoreState {
            active_readers: 0,
            writer_active: false,
            waiting_writers: 0,
        }),
        available: Condvar::new(),
    };

    type GuardMarker = GuardSend;

    fn lock_shared(&self) {
        self.acquire_read();
    }

    fn try_lock_shared(&self) -> bool {
        let mut state = self.state.lock();
        if state.writer_active || state.waiting_writers > 0 {
            return false;
        }
        state.active_readers += 1;
        true
    }

    unsafe fn unlock_shared(&self) {
        self.release_read();
    }

    fn lock_exclusive(&self) {
        self.acquire_write();
    }

    fn try_lock_exclusive(&self) -> bool {
        let mut state = self.state.lock();
        if state.writer_active || state.active_readers > 0 {
            return false;
        }
        state.writer_active = true;
        true
    }

    unsafe fn unlock_exclusive(&self) {
        self.release_write();
    }

    fn is_locked(&self) -> bool {
        let state = self.state.lock();
        state.writer_active || state.active_readers > 0
    }

    fn is_locked_exclusive(&self) -> bool {
        self.state.lock().writer_active
    }
}

/// Releases read access on drop
#[must_use = "read access is released as soon as the guard is dropped"]
pub struct ReadGuard<'a> {
    semaphore: &'a RwSemaphore,
}

impl Drop for ReadGuard<'_> {
    fn drop(&mut self) {
        self.semaphore.release_read();
    }
}

/// Releases write access on drop
#[must_use = "write access is released as soon as the guard is dropped"]
pub struct WriteGuard<'a> {
    semaphore: &'a RwSemaphore,
}

impl Drop for WriteGuard<'_> {
    fn drop(&mut self) {
        self.semaphore.release_write();
    }
}
