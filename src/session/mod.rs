//! Producer/consumer session around the integration engine
//!
//! A session runs two workers against one shared [`Task`](crate::jobs::Task):
//! - A **producer** that samples `job_count` random jobs and publishes each
//!   one into the shared slot
//! - A **consumer** that reads the slot `job_count` times and integrates
//!   every job it finds, sending results to a [`ResultSink`]
//! - A **coordinator** that starts both threads, enforces the optional
//!   timeout and joins them
//!
//! Delivery is best effort: the slot holds one job, so jobs can be
//! overwritten before they are read or read more than once.
//!
//! # Example
//!
//! ```ignore
//! use quadrature::session::{SessionConfig, LogJobSampler, ConsoleSink, run_session};
//!
//! let config = SessionConfig::default().with_job_count(100).with_seed(42);
//! let sampler = LogJobSampler::from_config(&config)?;
//! let report = run_session(&config, sampler, Arc::new(ConsoleSink), &CancelToken::new())?;
//! ```

pub mod config;
pub mod consumer;
pub mod coordinator;
pub mod error;
pub mod producer;
pub mod sampler;
pub mod sink;

pub use config::{SamplingRange, SessionConfig};
pub use consumer::{Consumer, ConsumerReport};
pub use coordinator::{SessionReport, run_sequential, run_session};
pub use error::SessionError;
pub use producer::{Producer, ProducerReport};
pub use sampler::{JobSampler, LogJobSampler};
pub use sink::{ChannelSink, ConsoleSink, IntegrationRecord, NullSink, ResultSink};
