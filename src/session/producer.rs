//! Producer worker: publishes sampled jobs into the shared slot

use crate::jobs::Task;
use crate::session::sampler::JobSampler;
use crate::sync::CancelToken;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Statistics from one producer run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProducerReport {
    /// Jobs written into the slot
    pub published: usize,
    /// Whether the run stopped early because of cancellation
    pub cancelled: bool,
}

/// Writes `task.job_count()` sampled jobs into the task's slot
pub struct Producer<S> {
    task: Arc<Task>,
    sampler: S,
    delay: Option<Duration>,
}

impl<S: JobSampler> Producer<S> {
    pub fn new(task: Arc<Task>, sampler: S) -> Self {
        Self {
            task,
            sampler,
            delay: None,
        }
    }

    /// Sleep this long after every publish
    pub fn with_delay(mut self, delay: Option<Duration>) -> Self {
        self.delay = delay;
        self
    }

    /// Run until every job is published or `cancel` fires
    pub fn run(&mut self, cancel: &CancelToken) -> ProducerReport {
        let mut report = ProducerReport::default();

        for i in 0..self.task.job_count() {
            if cancel.is_cancelled() {
                debug!(iteration = i, "producer cancelled");
                report.cancelled = true;
                break;
            }

            let job = self.sampler.sample();
            debug!(
                iteration = i,
                left = job.left,
                right = job.right,
                step = job.step,
                "publishing job"
            );
            self.task.publish(job);
            report.published += 1;

            if let Some(delay) = self.delay
                && !cancel.sleep(delay)
            {
                report.cancelled = report.published < self.task.job_count();
                break;
            }
        }

        report
    }
}
