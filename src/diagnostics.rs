//! Fire-and-forget event emission. The runloop never waits on a diagnostics call, and a
//! failure to emit one is never itself an error: emitting is a side channel, not part of
//! the control flow it describes.

use std::collections::{HashMap, HashSet};

use tokio::sync::mpsc;

use crate::error::ClientError;
use crate::types::{Offset, TopicPartition};

#[derive(Debug, Clone)]
pub enum Event {
    Request(TopicPartition),
    RebalanceAssigned(HashSet<TopicPartition>),
    RebalanceRevoked(HashSet<TopicPartition>),
    Poll {
        requested: HashSet<TopicPartition>,
        fulfilled: Vec<TopicPartition>,
        not_fulfilled: Vec<TopicPartition>,
    },
    CommitStarted(HashMap<TopicPartition, Offset>),
    CommitSuccess(HashMap<TopicPartition, Offset>),
    CommitFailure(HashMap<TopicPartition, Offset>, ClientError),
}

pub trait DiagnosticsSink: Send + Sync {
    fn emit(&self, event: Event);
}

/// Discards every event. Useful as a default when no one is watching.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDiagnostics;

impl DiagnosticsSink for NoopDiagnostics {
    fn emit(&self, _event: Event) {}
}

/// Logs every event through `tracing`, at a level proportional to how noteworthy it is.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl DiagnosticsSink for TracingDiagnostics {
    fn emit(&self, event: Event) {
        match event {
            Event::Request(tp) => {
                tracing::trace!(%tp, "partition pull requested");
            }
            Event::RebalanceAssigned(set) => {
                tracing::info!(partitions = set.len(), "partitions assigned");
            }
            Event::RebalanceRevoked(set) => {
                tracing::info!(partitions = set.len(), "partitions revoked");
            }
            Event::Poll {
                requested,
                fulfilled,
                not_fulfilled,
            } => {
                tracing::trace!(
                    requested = requested.len(),
                    fulfilled = fulfilled.len(),
                    not_fulfilled = not_fulfilled.len(),
                    "poll completed"
                );
            }
            Event::CommitStarted(offsets) => {
                tracing::debug!(partitions = offsets.len(), "commit started");
            }
            Event::CommitSuccess(offsets) => {
                tracing::debug!(partitions = offsets.len(), "commit succeeded");
            }
            Event::CommitFailure(offsets, err) => {
                tracing::warn!(partitions = offsets.len(), error = %err, "commit failed");
            }
        }
    }
}

/// Forwards every event onto an unbounded channel. Meant for tests that need to assert on
/// what the runloop emitted; production code should prefer [`TracingDiagnostics`].
#[derive(Debug, Clone)]
pub struct ChannelDiagnostics(pub mpsc::UnboundedSender<Event>);

impl DiagnosticsSink for ChannelDiagnostics {
    fn emit(&self, event: Event) {
        // The receiving end being gone just means nobody is watching; not our problem.
        let _ = self.0.send(event);
    }
}
