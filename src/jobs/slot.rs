//! Shared job slot exchanged between the producer and the consumer
//!
//! The slot holds at most one job. Publishing overwrites whatever is there;
//! reading hands back a complete copy, never a mix of two publishes. There
//! is no queue, so a job that is overwritten before it is read is lost.

use crate::jobs::job::Job;
use crate::sync::SemaphoreLock;
use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};
use parking_lot::Mutex;
use std::sync::Arc;

/// How access to the shared slot is synchronized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncMode {
    /// One mutex guards both publishing and reading
    Exclusive,
    /// Reader/writer semaphore: writes exclude everything, reads only writes
    #[default]
    ReadWrite,
    /// Single-slot channel; reading takes the job out of the slot
    Channel,
}

impl SyncMode {
    /// Build an empty slot synchronized with this mode
    pub fn create_slot(self) -> Arc<dyn JobSlot> {
        match self {
            SyncMode::Exclusive => Arc::new(ExclusiveSlot::new()),
            SyncMode::ReadWrite => Arc::new(ReadWriteSlot::new()),
            SyncMode::Channel => Arc::new(ChannelSlot::new()),
        }
    }
}

impl std::fmt::Display for SyncMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncMode::Exclusive => write!(f, "exclusive"),
            SyncMode::ReadWrite => write!(f, "read-write"),
            SyncMode::Channel => write!(f, "channel"),
        }
    }
}

impl std::str::FromStr for SyncMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "exclusive" | "mutex" | "simple" => Ok(SyncMode::Exclusive),
            "read-write" | "rw" | "semaphore" => Ok(SyncMode::ReadWrite),
            "channel" | "handoff" => Ok(SyncMode::Channel),
            _ => Err(format!(
                "Unknown sync mode: '{}'. Valid options: exclusive, read-write, channel",
                s
            )),
        }
    }
}

/// Accessors for the shared job slot
///
/// These are the only way to reach the job; implementations decide how
/// the two calls are synchronized.
pub trait JobSlot: Send + Sync {
    /// Overwrite the slot with `job`
    fn publish(&self, job: Job);

    /// Copy the current job, or `None` if nothing is available
    fn snapshot(&self) -> Option<Job>;

    /// The synchronization this slot uses
    fn mode(&self) -> SyncMode;
}

/// Slot guarded by a single mutex
#[derive(Debug, Default)]
pub struct ExclusiveSlot {
    job: Mutex<Option<Job>>,
}

impl ExclusiveSlot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl JobSlot for ExclusiveSlot {
    fn publish(&self, job: Job) {
        *self.job.lock() = Some(job);
    }

    fn snapshot(&self) -> Option<Job> {
        self.job.lock().clone()
    }

    fn mode(&self) -> SyncMode {
        SyncMode::Exclusive
    }
}

/// Slot guarded by the reader/writer semaphore
#[derive(Debug, Default)]
pub struct ReadWriteSlot {
    job: SemaphoreLock<Option<Job>>,
}

impl ReadWriteSlot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl JobSlot for ReadWriteSlot {
    fn publish(&self, job: Job) {
        *self.job.write() = Some(job);
    }

    fn snapshot(&self) -> Option<Job> {
        self.job.read().clone()
    }

    fn mode(&self) -> SyncMode {
        SyncMode::ReadWrite
    }
}

/// Slot backed by a channel of capacity one
///
/// Publishing evicts a job nobody has taken yet. Reading removes the job,
/// so unlike the other slots a job is never handed out twice.
#[derive(Debug)]
pub struct ChannelSlot {
    tx: Sender<Job>,
    rx: Receiver<Job>,
}

impl ChannelSlot {
    pub fn new() -> Self {
        let (tx, rx) = bounded(1);
        Self { tx, rx }
    }
}

impl Default for ChannelSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl JobSlot for ChannelSlot {
    fn publish(&self, job: Job) {
        let mut job = job;
        loop {
            match self.tx.try_send(job) {
                Ok(()) => return,
                Err(TrySendError::Full(rejected)) => {
                    // Drop the stale job and try again
                    let _ = self.rx.try_recv();
                    job = rejected;
                }
                // Both ends live in `self`, so this cannot happen
                Err(TrySendError::Disconnected(_)) => return,
            }
        }
    }

    fn snapshot(&self) -> Option<Job> {
        self.rx.try_recv().ok()
    }

    fn mode(&self) -> SyncMode {
        SyncMode::Channel
    }
}
