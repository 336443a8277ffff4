//! Core data model: topic-partitions, offsets, records, and the commands that flow through
//! the runloop.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::{mpsc, oneshot};

use crate::error::{CommitError, RequestError};

/// The 0-based position within a partition.
pub type Offset = i64;

/// A batch of values, in arrival order.
pub type Chunk<T> = Vec<T>;

/// Identifies a single partition of a single topic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TopicPartition {
    pub topic: Arc<str>,
    pub partition: i32,
}

impl TopicPartition {
    pub fn new(topic: impl Into<Arc<str>>, partition: i32) -> Self {
        Self {
            topic: topic.into(),
            partition,
        }
    }
}

impl std::fmt::Display for TopicPartition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.topic, self.partition)
    }
}

/// A single immutable record read from a partition.
#[derive(Debug, Clone)]
pub struct Record {
    pub tp: TopicPartition,
    pub offset: Offset,
    pub key: Option<Bytes>,
    pub payload: Bytes,
}

/// A [`Record`] bundled with a closure that commits its offset.
///
/// Cloning the sender is cheap; each `commit()` call enqueues its own single-entry
/// [`CommitCommand`] and awaits its own completion, so concurrent commits from distinct
/// `CommittableRecord`s never block each other.
#[derive(Debug, Clone)]
pub struct CommittableRecord {
    record: Record,
    commit_tx: mpsc::UnboundedSender<CommitCommand>,
}

impl CommittableRecord {
    pub(crate) fn new(record: Record, commit_tx: mpsc::UnboundedSender<CommitCommand>) -> Self {
        Self { record, commit_tx }
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Commits this record's offset (i.e. `offset + 1` as the resume point) and waits for the
    /// runloop to acknowledge it.
    pub async fn commit(&self) -> Result<(), CommitError> {
        let (completion, rx) = oneshot::channel();
        let mut offsets = HashMap::with_capacity(1);
        offsets.insert(self.record.tp.clone(), self.record.offset);
        let cmd = CommitCommand {
            offsets,
            completion,
        };
        self.commit_tx
            .send(cmd)
            .map_err(|_| CommitError::RunloopGone)?;
        rx.await.map_err(|_| CommitError::RunloopGone)?
    }
}

/// A single downstream pull against one partition.
pub(crate) struct Request {
    pub tp: TopicPartition,
    pub completion: oneshot::Sender<Result<Chunk<CommittableRecord>, RequestError>>,
}

/// One user-initiated commit, possibly spanning several partitions.
pub(crate) struct CommitCommand {
    pub offsets: HashMap<TopicPartition, Offset>,
    pub completion: oneshot::Sender<Result<(), CommitError>>,
}

/// How newly-assigned partitions pick up their starting offset.
pub enum OffsetRetrieval {
    /// Defer to the client's configured reset policy; no seek is issued.
    Auto,
    /// Seek every newly-assigned partition to the offset the callback returns for it.
    Manual(Box<dyn Fn(&[TopicPartition]) -> HashMap<TopicPartition, Offset> + Send + Sync>),
}

impl std::fmt::Debug for OffsetRetrieval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OffsetRetrieval::Auto => write!(f, "OffsetRetrieval::Auto"),
            OffsetRetrieval::Manual(_) => write!(f, "OffsetRetrieval::Manual(..)"),
        }
    }
}
