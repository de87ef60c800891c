//! Result sinks: where the consumer sends computed integrals

use crossbeam_channel::{Receiver, Sender, unbounded};
use std::fmt;

/// One successfully integrated job
#[derive(Debug, Clone, PartialEq)]
pub struct IntegrationRecord {
    pub function: String,
    pub left: f64,
    pub right: f64,
    pub step: f64,
    pub value: f64,
}

impl fmt::Display for IntegrationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Result {:.4} {:.4} {:.4} {:.8}",
            self.left, self.right, self.step, self.value
        )
    }
}

/// Append-only consumer of integration records
///
/// `emit` must not block indefinitely; the consumer calls it from its loop.
pub trait ResultSink: Send + Sync {
    fn emit(&self, record: IntegrationRecord);
}

/// Prints each record on stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl ResultSink for ConsoleSink {
    fn emit(&self, record: IntegrationRecord) {
        println!("{}", record);
    }
}

/// Forwards records into an unbounded channel
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: Sender<IntegrationRecord>,
}

impl ChannelSink {
    /// Create a sink together with the receiving end of its channel
    pub fn new() -> (Self, Receiver<IntegrationRecord>) {
        let (tx, rx) = unbounded();
        (Self { tx }, rx)
    }
}

impl ResultSink for ChannelSink {
    fn emit(&self, record: IntegrationRecord) {
        // A dropped receiver just means nobody is listening any more
        let _ = self.tx.send(record);
    }
}

/// Discards every record
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ResultSink for NullSink {
    fn emit(&self, _record: IntegrationRecord) {}
}
