//! Task: the shared slot plus the number of jobs a session exchanges

use crate::jobs::job::Job;
use crate::jobs::slot::{JobSlot, SyncMode};
use std::sync::Arc;

/// State shared by the producer and the consumer of one session
///
/// Created before both workers start and dropped after both have joined.
/// The slot is private: workers go through [`Task::publish`] and
/// [`Task::snapshot`].
pub struct Task {
    slot: Arc<dyn JobSlot>,
    job_count: usize,
}

impl Task {
    /// Create a task with an empty slot synchronized by `mode`
    pub fn new(job_count: usize, mode: SyncMode) -> Self {
        Self::with_slot(job_count, mode.create_slot())
    }

    /// Create a task around an existing slot implementation
    pub fn with_slot(job_count: usize, slot: Arc<dyn JobSlot>) -> Self {
        Self { slot, job_count }
    }

    pub fn job_count(&self) -> usize {
        self.job_count
    }

    pub fn mode(&self) -> SyncMode {
        self.slot.mode()
    }

    pub fn publish(&self, job: Job) {
        self.slot.publish(job);
    }

    pub fn snapshot(&self) -> Option<Job> {
        self.slot.snapshot()
    }
}

impl std::fmt::Debug for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task")
            .field("mode", &self.slot.mode())
            .field("job_count", &self.job_count)
            .finish()
    }
}
