//! Session coordinator: starts the producer and consumer and joins them

use crate::jobs::{SyncMode, Task};
use crate::session::config::SessionConfig;
use crate::session::consumer::{Consumer, ConsumerReport};
use crate::session::error::SessionError;
use crate::session::producer::{Producer, ProducerReport};
use crate::session::sampler::JobSampler;
use crate::session::sink::{IntegrationRecord, ResultSink};
use crate::sync::CancelToken;
use crossbeam_channel::{RecvTimeoutError, unbounded};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Message sent from a worker to the coordinator when it finishes
#[derive(Debug, Clone)]
enum WorkerMessage {
    ProducerFinished(ProducerReport),
    ConsumerFinished(ConsumerReport),
}

/// Outcome of a producer/consumer session
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub sync_mode: SyncMode,
    pub job_count: usize,
    pub producer: ProducerReport,
    pub consumer: ConsumerReport,
    pub elapsed: Duration,
    /// Whether either worker stopped early (caller cancellation or timeout)
    pub cancelled: bool,
    /// Whether the coordinator's deadline fired
    pub timed_out: bool,
}

impl SessionReport {
    /// Share of published jobs that produced a result
    pub fn delivery_rate(&self) -> f64 {
        if self.producer.published == 0 {
            0.0
        } else {
            self.consumer.results as f64 / self.producer.published as f64
        }
    }
}

/// Run the producer and consumer on two threads until both finish
///
/// `cancel` may be fired from another thread to stop the session early. The
/// workers run on a child of `cancel`; if the config has a timeout, the
/// coordinator cancels that child once the deadline passes and leaves the
/// caller's token untouched.
pub fn run_session<S>(
    config: &SessionConfig,
    sampler: S,
    sink: Arc<dyn ResultSink>,
    cancel: &CancelToken,
) -> Result<SessionReport, SessionError>
where
    S: JobSampler + 'static,
{
    let start_time = Instant::now();
    let task = Arc::new(Task::new(config.job_count, config.sync_mode));
    info!(
        mode = %config.sync_mode,
        jobs = config.job_count,
        "starting session"
    );

    let session_cancel = cancel.child_token();
    let (to_coordinator, from_workers) = unbounded();

    let producer_handle = {
        let mut producer =
            Producer::new(Arc::clone(&task), sampler).with_delay(config.producer_delay);
        let cancel = session_cancel.clone();
        let tx = to_coordinator.clone();
        std::thread::spawn(move || {
            let report = producer.run(&cancel);
            let _ = tx.send(WorkerMessage::ProducerFinished(report));
        })
    };

    let consumer_handle = {
        let consumer = Consumer::new(Arc::clone(&task), sink)
            .with_idle_delay(config.idle_delay)
            .with_pace_delay(config.pace_delay);
        let cancel = session_cancel.clone();
        let tx = to_coordinator;
        std::thread::spawn(move || {
            let report = consumer.run(&cancel);
            let _ = tx.send(WorkerMessage::ConsumerFinished(report));
        })
    };

    let deadline = config.timeout.map(|t| start_time + t);
    let mut producer_report = None;
    let mut consumer_report = None;
    let mut timed_out = false;

    while producer_report.is_none() || consumer_report.is_none() {
        if !timed_out && deadline.is_some_and(|d| Instant::now() >= d) {
            warn!("session timed out, cancelling workers");
            session_cancel.cancel();
            timed_out = true;
        }

        match from_workers.recv_timeout(Duration::from_millis(20)) {
            Ok(WorkerMessage::ProducerFinished(report)) => producer_report = Some(report),
            Ok(WorkerMessage::ConsumerFinished(report)) => consumer_report = Some(report),
            Err(RecvTimeoutError::Timeout) => {}
            // Both senders dropped: a worker died without reporting
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    let producer_joined = producer_handle.join();
    let consumer_joined = consumer_handle.join();
    if producer_joined.is_err() {
        return Err(SessionError::WorkerPanicked { worker: "producer" });
    }
    if consumer_joined.is_err() {
        return Err(SessionError::WorkerPanicked { worker: "consumer" });
    }

    let producer = producer_report.ok_or(SessionError::WorkerPanicked { worker: "producer" })?;
    let consumer = consumer_report.ok_or(SessionError::WorkerPanicked { worker: "consumer" })?;

    let report = SessionReport {
        sync_mode: config.sync_mode,
        job_count: config.job_count,
        cancelled: producer.cancelled || consumer.cancelled,
        timed_out,
        producer,
        consumer,
        elapsed: start_time.elapsed(),
    };
    info!(
        published = report.producer.published,
        reads = report.consumer.reads,
        results = report.consumer.results,
        failures = report.consumer.failures,
        cancelled = report.cancelled,
        timed_out = report.timed_out,
        "session finished"
    );

    Ok(report)
}

/// Generate and integrate every job on the calling thread
///
/// The single-threaded baseline: each job is published and immediately read
/// back, so nothing is lost or duplicated. No pacing sleeps are applied.
pub fn run_sequential<S>(
    config: &SessionConfig,
    mut sampler: S,
    sink: &dyn ResultSink,
    cancel: &CancelToken,
) -> SessionReport
where
    S: JobSampler,
{
    let start_time = Instant::now();
    let task = Task::new(config.job_count, config.sync_mode);
    let mut producer = ProducerReport::default();
    let mut consumer = ConsumerReport::default();

    for _ in 0..task.job_count() {
        if cancel.is_cancelled() {
            producer.cancelled = true;
            consumer.cancelled = true;
            break;
        }

        task.publish(sampler.sample());
        producer.published += 1;

        consumer.reads += 1;
        let Some(job) = task.snapshot() else {
            consumer.idle_passes += 1;
            continue;
        };
        match job.integrate() {
            Ok(value) => {
                sink.emit(IntegrationRecord {
                    function: job.function.name(),
                    left: job.left,
                    right: job.right,
                    step: job.step,
                    value,
                });
                consumer.results += 1;
            }
            Err(e) => {
                warn!(
                    left = job.left,
                    right = job.right,
                    step = job.step,
                    error = %e,
                    "integration failed"
                );
                consumer.failures += 1;
            }
        }
    }

    SessionReport {
        sync_mode: config.sync_mode,
        job_count: config.job_count,
        cancelled: producer.cancelled || consumer.cancelled,
        timed_out: false,
        producer,
        consumer,
        elapsed: start_time.elapsed(),
    }
}
