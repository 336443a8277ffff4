//! A back-pressured, demand-driven adapter over a single-threaded Kafka-style consumer
//! client: one independent byte-record stream per assigned partition, commits that coexist
//! safely with rebalances, and graceful shutdown that never leaves a caller waiting forever.
//!
//! [`handle::spawn`] is the entry point. It wires a [`client::KafkaClient`] implementation
//! (either [`client::RdKafkaClient`] or a test double) into a runloop task and hands back a
//! [`handle::RunloopHandle`].

mod client;
mod config;
mod diagnostics;
mod error;
mod hub;
mod queues;
mod rebalance;
mod runloop;
mod shutdown;
mod state;
mod types;

pub mod handle;

pub use client::{build_consumer_context, KafkaClient, RdKafkaClient, RunloopContext};
pub use config::RunloopConfig;
pub use diagnostics::{ChannelDiagnostics, DiagnosticsSink, Event, NoopDiagnostics, TracingDiagnostics};
pub use error::{ClientError, CommitError, RequestError, RunloopError};
pub use handle::{spawn, RunloopHandle};
pub use hub::PartitionStream;
pub use rebalance::RebalanceTracker;
pub use types::{Chunk, CommittableRecord, Offset, OffsetRetrieval, Record, TopicPartition};
