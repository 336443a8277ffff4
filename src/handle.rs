//! The thin public surface: spawn a runloop task, get back a handle to drive it.

use std::collections::HashMap;
use std::sync::Arc;

use futures::Stream;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::client::{ClientGate, KafkaClient};
use crate::config::RunloopConfig;
use crate::diagnostics::DiagnosticsSink;
use crate::error::{CommitError, RequestError, RunloopError};
use crate::hub::{PartitionHub, PartitionStream};
use crate::queues::{CommandQueues, CommandSenders};
use crate::rebalance::RebalanceTracker;
use crate::runloop::Runloop;
use crate::shutdown::ShutdownGate;
use crate::types::{Chunk, CommitCommand, CommittableRecord, Offset, OffsetRetrieval, Request, TopicPartition};

/// The public handle to a running [`Runloop`]. Cheap to clone; every clone shares the same
/// command queues, partition hub, and shutdown flag.
#[derive(Clone)]
pub struct RunloopHandle {
    senders: CommandSenders,
    hub: Arc<PartitionHub>,
    shutdown: ShutdownGate,
}

impl RunloopHandle {
    /// Pulls the next available chunk for `tp`. Resolves to `Err(RequestError::Absent)` once
    /// the partition is no longer assigned, or the runloop has shut down.
    pub async fn request(&self, tp: TopicPartition) -> Result<Chunk<CommittableRecord>, RequestError> {
        let (completion, rx) = oneshot::channel();
        self.senders
            .requests
            .send(Request { tp, completion })
            .map_err(|_| RequestError::Absent)?;
        rx.await.map_err(|_| RequestError::Absent)?
    }

    /// Commits `offsets` (each a last-consumed offset; the runloop sends `offset + 1`).
    pub async fn commit(&self, offsets: HashMap<TopicPartition, Offset>) -> Result<(), CommitError> {
        let (completion, rx) = oneshot::channel();
        self.senders
            .commits
            .send(CommitCommand { offsets, completion })
            .map_err(|_| CommitError::RunloopGone)?;
        rx.await.map_err(|_| CommitError::RunloopGone)?
    }

    /// The stream of assigned partitions, each paired with its own demand-driven record
    /// stream.
    ///
    /// # Panics
    /// Panics if called more than once.
    pub fn partitions_stream(
        &self,
    ) -> impl Stream<Item = Result<(TopicPartition, PartitionStream), Arc<RunloopError>>> {
        self.hub.take_stream()
    }

    /// Idempotently requests shutdown. Returns immediately; does not wait for the runloop to
    /// drain. Callers that need to observe completion should await the `JoinHandle` returned
    /// alongside this handle by [`spawn`].
    pub fn graceful_shutdown(&self) {
        if self.shutdown.trigger() {
            self.hub.end();
        }
    }
}

/// Spawns the runloop task and returns a handle to it plus its `JoinHandle`.
///
/// `rebalance` must be the same [`RebalanceTracker`] the client's `ConsumerContext` reports
/// into (see [`crate::client::build_consumer_context`]). The runloop reads it to decide
/// whether commits should be deferred.
pub fn spawn<C: KafkaClient + 'static>(
    client: C,
    rebalance: Arc<RebalanceTracker>,
    config: RunloopConfig,
    offset_retrieval: OffsetRetrieval,
    diagnostics: Arc<dyn DiagnosticsSink>,
) -> (RunloopHandle, JoinHandle<()>) {
    let gate = Arc::new(ClientGate::new(client));
    let (queues, senders) = CommandQueues::new(config.poll_frequency());
    let hub = Arc::new(PartitionHub::new());
    let shutdown = ShutdownGate::new();

    let runloop = Runloop::new(
        gate,
        queues,
        Arc::clone(&hub),
        shutdown.clone(),
        rebalance,
        diagnostics,
        config,
        offset_retrieval,
        senders.commits.clone(),
        senders.requests.clone(),
    );

    let join = tokio::spawn(runloop.run());

    (
        RunloopHandle {
            senders,
            hub,
            shutdown,
        },
        join,
    )
}
