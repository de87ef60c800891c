use quadrature::function::{Exp, Log};
use quadrature::jobs::{Job, SyncMode, Task};
use quadrature::session::{
    ChannelSink, Consumer, LogJobSampler, NullSink, Producer, SamplingRange, SessionConfig,
    SessionError, run_sequential, run_session,
};
use parking_lot::Mutex;
use quadrature::sync::CancelToken;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

const ALL_MODES: [SyncMode; 3] = [SyncMode::Exclusive, SyncMode::ReadWrite, SyncMode::Channel];

fn hundred_job_config(mode: SyncMode) -> SessionConfig {
    SessionConfig::default()
        .with_job_count(100)
        .with_sync_mode(mode)
        .with_seed(2024)
        .with_pace_delay(Duration::from_millis(1))
        .with_producer_delay(Duration::from_millis(1))
        .with_timeout(Duration::from_secs(60))
}

#[test]
fn test_hundred_jobs_every_mode() {
    for mode in ALL_MODES {
        let config = hundred_job_config(mode);
        let sampler = LogJobSampler::from_config(&config).unwrap();
        let (sink, rx) = ChannelSink::new();

        let report = run_session(&config, sampler, Arc::new(sink), &CancelToken::new()).unwrap();

        assert_eq!(report.sync_mode, mode);
        assert_eq!(report.producer.published, 100, "{} mode", mode);
        assert!(report.consumer.reads <= 100, "{} mode", mode);
        assert!(report.consumer.results <= 100, "{} mode", mode);
        assert_eq!(report.consumer.failures, 0, "{} mode", mode);
        assert_eq!(
            report.consumer.results + report.consumer.idle_passes,
            report.consumer.reads
        );
        assert_eq!(rx.try_iter().count(), report.consumer.results);
        assert!(!report.cancelled);
    }
}

#[test]
fn test_slow_producer_still_yields_results() {
    // The first job lands almost immediately and stays in the slot until the
    // next publish, so the consumer cannot spend all 100 passes idle
    let config = SessionConfig::default()
        .with_job_count(100)
        .with_sync_mode(SyncMode::ReadWrite)
        .with_seed(9)
        .with_producer_delay(Duration::from_millis(2))
        .with_pace_delay(Duration::from_millis(5))
        .with_idle_delay(Duration::from_millis(5))
        .with_timeout(Duration::from_secs(60));
    let sampler = LogJobSampler::from_config(&config).unwrap();

    let report = run_session(&config, sampler, Arc::new(NullSink), &CancelToken::new()).unwrap();
    assert!(report.consumer.results > 0);
    assert!(report.consumer.results <= 100);
}

#[test]
fn test_session_results_match_published_jobs() {
    // Every emitted record must integrate exactly one of the published jobs
    let config = SessionConfig::default()
        .with_job_count(50)
        .with_sync_mode(SyncMode::Exclusive)
        .with_pace_delay(Duration::from_millis(1))
        .with_timeout(Duration::from_secs(60));

    let published: Arc<Mutex<Vec<(f64, f64, f64)>>> = Arc::new(Mutex::new(Vec::new()));
    let sampler = {
        let published = Arc::clone(&published);
        let mut n = 0u32;
        move || {
            n += 1;
            let left = n as f64;
            published.lock().push((left, left + 10.0, 0.5));
            Job::new(Arc::new(Exp), left, left + 10.0, 0.5)
        }
    };

    let (sink, rx) = ChannelSink::new();
    let report = run_session(&config, sampler, Arc::new(sink), &CancelToken::new()).unwrap();
    assert_eq!(report.producer.published, 50);

    let published = published.lock().clone();
    for record in rx.try_iter() {
        assert!(published.contains(&(record.left, record.right, record.step)));
        let expected = quadrature::integrate(&Exp, record.left, record.right, record.step).unwrap();
        assert_eq!(record.value, expected);
    }
}

#[test]
fn test_external_cancel_stops_session_promptly() {
    let config = SessionConfig::default()
        .with_job_count(1_000_000)
        .with_seed(3)
        .with_producer_delay(Duration::from_millis(20))
        .with_pace_delay(Duration::from_millis(20))
        .with_idle_delay(Duration::from_millis(20));
    let sampler = LogJobSampler::from_config(&config).unwrap();
    let cancel = CancelToken::new();

    let canceller = {
        let cancel = cancel.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(100));
            cancel.cancel();
            Instant::now()
        })
    };

    let report = run_session(&config, sampler, Arc::new(NullSink), &cancel).unwrap();
    let cancelled_at = canceller.join().unwrap();

    assert!(report.cancelled);
    assert!(report.producer.published < 1_000_000);
    assert!(report.consumer.reads < 1_000_000);
    // Both workers were asleep or between iterations; they must not linger
    assert!(cancelled_at.elapsed() < Duration::from_secs(5));
}

#[test]
fn test_cancelled_consumer_does_not_keep_counting() {
    let task = Arc::new(Task::new(1_000_000, SyncMode::ReadWrite));
    task.publish(Job::new(Arc::new(Exp), 0.0, 1.0, 0.01));

    let cancel = CancelToken::new();
    let (sink, rx) = ChannelSink::new();
    let handle = {
        let consumer = Consumer::new(Arc::clone(&task), Arc::new(sink))
            .with_pace_delay(Duration::from_millis(10));
        let cancel = cancel.clone();
        thread::spawn(move || consumer.run(&cancel))
    };

    thread::sleep(Duration::from_millis(80));
    cancel.cancel();
    let report = handle.join().unwrap();

    assert!(report.cancelled);
    assert!(report.results > 0);
    let emitted = rx.try_iter().count();
    assert_eq!(emitted, report.results);

    // The worker is gone: nothing more arrives after cancellation
    thread::sleep(Duration::from_millis(50));
    assert_eq!(rx.try_iter().count(), 0);
}

#[test]
fn test_producer_cancel_during_throttle() {
    let task = Arc::new(Task::new(1_000_000, SyncMode::Exclusive));
    let cancel = CancelToken::new();
    let published = Arc::new(AtomicUsize::new(0));

    let handle = {
        let published = Arc::clone(&published);
        let sampler = move || {
            published.fetch_add(1, Ordering::SeqCst);
            Job::new(Arc::new(Log::natural()), 1.0, 2.0, 0.1)
        };
        let mut producer =
            Producer::new(Arc::clone(&task), sampler).with_delay(Some(Duration::from_secs(30)));
        let cancel = cancel.clone();
        thread::spawn(move || producer.run(&cancel))
    };

    thread::sleep(Duration::from_millis(50));
    let start = Instant::now();
    cancel.cancel();
    let report = handle.join().unwrap();

    assert!(start.elapsed() < Duration::from_secs(5));
    assert_eq!(report.published, 1);
    assert!(report.cancelled);
    assert_eq!(published.load(Ordering::SeqCst), 1);
}

#[test]
fn test_same_seed_reproduces_sequential_run() {
    let config = SessionConfig::default().with_job_count(30).with_seed(77);

    let collect = || {
        let (sink, rx) = ChannelSink::new();
        let sampler = LogJobSampler::from_config(&config).unwrap();
        run_sequential(&config, sampler, &sink, &CancelToken::new());
        rx.try_iter().collect::<Vec<_>>()
    };

    let first = collect();
    let second = collect();
    assert_eq!(first.len(), 30);
    assert_eq!(first, second);
}

#[test]
fn test_invalid_sampling_range_rejected() {
    let config = SessionConfig::default().with_sampling(SamplingRange::default().with_step(0.0, 0.5));
    assert!(matches!(
        LogJobSampler::from_config(&config),
        Err(SessionError::InvalidConfig(_))
    ));
}
