//! Consumer worker: reads the shared slot and integrates what it finds

use crate::jobs::Task;
use crate::session::sink::{IntegrationRecord, ResultSink};
use crate::sync::CancelToken;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Statistics from one consumer run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsumerReport {
    /// Loop passes that read the slot
    pub reads: usize,
    /// Passes that found the slot empty
    pub idle_passes: usize,
    /// Jobs integrated and emitted to the sink
    pub results: usize,
    /// Jobs the engine rejected
    pub failures: usize,
    /// Whether the run stopped early because of cancellation
    pub cancelled: bool,
}

/// Reads the slot `task.job_count()` times, integrating every job it sees
///
/// Each pass counts toward the job count whether or not it found a job, so
/// the consumer never reads more than `job_count` times. Overwritten jobs
/// are missed and slow producers cause the same job to be integrated again.
pub struct Consumer {
    task: Arc<Task>,
    sink: Arc<dyn ResultSink>,
    idle_delay: Duration,
    pace_delay: Duration,
}

impl Consumer {
    pub fn new(task: Arc<Task>, sink: Arc<dyn ResultSink>) -> Self {
        Self {
            task,
            sink,
            idle_delay: Duration::from_millis(1),
            pace_delay: Duration::from_millis(10),
        }
    }

    /// Sleep this long after finding the slot empty
    pub fn with_idle_delay(mut self, delay: Duration) -> Self {
        self.idle_delay = delay;
        self
    }

    /// Sleep this long after each emitted result
    pub fn with_pace_delay(mut self, delay: Duration) -> Self {
        self.pace_delay = delay;
        self
    }

    /// Run until every pass is done or `cancel` fires
    pub fn run(&self, cancel: &CancelToken) -> ConsumerReport {
        let mut report = ConsumerReport::default();
        let job_count = self.task.job_count();

        for i in 0..job_count {
            if cancel.is_cancelled() {
                debug!(iteration = i, "consumer cancelled");
                report.cancelled = true;
                break;
            }

            report.reads += 1;
            let Some(job) = self.task.snapshot() else {
                report.idle_passes += 1;
                if !cancel.sleep(self.idle_delay) {
                    report.cancelled = i + 1 < job_count;
                    break;
                }
                continue;
            };

            match job.integrate() {
                Ok(value) => {
                    debug!(iteration = i, %job, value, "job integrated");
                    self.sink.emit(IntegrationRecord {
                        function: job.function.name(),
                        left: job.left,
                        right: job.right,
                        step: job.step,
                        value,
                    });
                    report.results += 1;

                    if !cancel.sleep(self.pace_delay) {
                        report.cancelled = i + 1 < job_count;
                        break;
                    }
                }
                Err(e) => {
                    warn!(
                        left = job.left,
                        right = job.right,
                        step = job.step,
                        error = %e,
                        "integration failed"
                    );
                    report.failures += 1;
                }
            }
        }

        report
    }
}
