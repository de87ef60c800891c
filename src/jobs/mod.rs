//! Integration jobs and the slot they are exchanged through

pub mod job;
pub mod slot;
pub mod task;

pub use job::Job;
pub use slot::{ChannelSlot, ExclusiveSlot, JobSlot, ReadWriteSlot, SyncMode};
pub use task::Task;
