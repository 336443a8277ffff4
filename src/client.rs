//! The external-collaborator boundary. `KafkaClient` is the interface the runloop drives; its
//! concrete `librdkafka` binding is a thin adapter that this spec treats as out of scope for
//! correctness against a live broker (but which has to exist for the crate to run against
//! anything real).

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rdkafka::consumer::{BaseConsumer, Consumer, ConsumerContext, Rebalance, RebalanceProtocol};
use rdkafka::error::KafkaResult;
use rdkafka::util::Timeout;
use rdkafka::{ClientContext, Offset as RdOffset, TopicPartitionList};

use crate::diagnostics::DiagnosticsSink;
use crate::error::ClientError;
use crate::rebalance::RebalanceTracker;
use crate::types::{Offset, Record, TopicPartition};

/// A callback invoked, exactly once, with the outcome of one `commit_async` call. Run
/// synchronously from inside the client's `poll`, or inline by the adapter itself if the
/// commit failed before it was ever handed to the broker.
pub(crate) type CommitCallback = Box<dyn FnOnce(Result<(), ClientError>) + Send>;

/// The set of operations the runloop needs from the underlying, single-threaded consumer
/// client. Every method is synchronous: none of them `.await`, matching a client whose
/// poll/commit/assignment surface must all be driven from one owning thread at a time.
pub trait KafkaClient: Send {
    fn assignment(&mut self) -> Result<HashSet<TopicPartition>, ClientError>;
    fn pause(&mut self, partitions: &HashSet<TopicPartition>) -> Result<(), ClientError>;
    fn resume(&mut self, partitions: &HashSet<TopicPartition>) -> Result<(), ClientError>;
    fn seek(&mut self, tp: &TopicPartition, offset: Offset) -> Result<(), ClientError>;

    /// Blocks up to `timeout` waiting for records. `Ok(None)` models the swallowed
    /// "subscription not active yet" condition, treated as "no records", not an error.
    fn poll(&mut self, timeout: Duration) -> Result<Option<Vec<Record>>, ClientError>;

    /// Hands `offsets` to the broker asynchronously. `callback` fires, exactly once, from a
    /// later `poll` call, unless the commit fails before being handed off, in which case the
    /// adapter invokes it inline before returning `Err`.
    fn commit_async(
        &mut self,
        offsets: &HashMap<TopicPartition, Offset>,
        callback: CommitCallback,
    ) -> Result<(), ClientError>;
}

/// Serializes every call into the client behind a plain `Mutex`. `with_client` never holds the
/// lock across an `.await` point, since every `KafkaClient` method is synchronous, so a
/// `std::sync::Mutex` is the right tool, not `tokio::sync::Mutex`.
pub(crate) struct ClientGate<C> {
    client: Mutex<C>,
}

impl<C: KafkaClient> ClientGate<C> {
    pub fn new(client: C) -> Self {
        Self {
            client: Mutex::new(client),
        }
    }

    pub fn with_client<T>(&self, f: impl FnOnce(&mut C) -> T) -> T {
        let mut guard = self.client.lock().expect("kafka client mutex poisoned");
        f(&mut guard)
    }
}

/// Forwards `librdkafka`'s rebalance and commit callbacks, which it invokes synchronously,
/// on the thread inside `poll`, into the runloop's [`RebalanceTracker`] and
/// [`DiagnosticsSink`], and resolves queued commit callbacks in the order they were issued
/// (librdkafka services its internal consumer-group ops queue in order, so FIFO delivery here
/// matches broker-side commit ordering).
pub struct RunloopContext {
    tracker: Arc<RebalanceTracker>,
    diagnostics: Arc<dyn DiagnosticsSink>,
    commit_waiters: Mutex<std::collections::VecDeque<CommitCallback>>,
}

impl RunloopContext {
    pub fn new(tracker: Arc<RebalanceTracker>, diagnostics: Arc<dyn DiagnosticsSink>) -> Self {
        Self {
            tracker,
            diagnostics,
            commit_waiters: Mutex::new(std::collections::VecDeque::new()),
        }
    }

    fn queue_commit_waiter(&self, callback: CommitCallback) {
        self.commit_waiters.lock().unwrap().push_back(callback);
    }

    fn pop_commit_waiter(&self) -> Option<CommitCallback> {
        self.commit_waiters.lock().unwrap().pop_front()
    }
}

impl ClientContext for RunloopContext {}

/// Builds a fresh [`RunloopContext`] plus the [`RebalanceTracker`] it reports into. The
/// tracker must be handed to [`crate::handle::spawn`] alongside the client built from this
/// context, so the runloop and the rebalance callbacks agree on one flag.
pub fn build_consumer_context(
    diagnostics: Arc<dyn DiagnosticsSink>,
) -> (RunloopContext, Arc<RebalanceTracker>) {
    let tracker = crate::rebalance::new_tracker();
    (RunloopContext::new(Arc::clone(&tracker), diagnostics), tracker)
}

fn partitions_of(tpl: &TopicPartitionList) -> HashSet<TopicPartition> {
    tpl.elements()
        .iter()
        .map(|e| TopicPartition::new(e.topic().to_owned(), e.partition()))
        .collect()
}

impl ConsumerContext for RunloopContext {
    /// Overrides the full rebalance callback, rather than just `pre_rebalance`/
    /// `post_rebalance`, because only this one is handed `base_consumer`: pausing a revoked
    /// partition (per §4.2 — defensive against resumed duplicates arriving before the next
    /// assignment completes) needs gated client access that `pre_rebalance` doesn't get.
    fn rebalance(
        &self,
        base_consumer: &BaseConsumer<Self>,
        rebalance: &Rebalance,
        rebalance_protocol: RebalanceProtocol,
    ) {
        match rebalance {
            Rebalance::Revoke(tpl) => {
                let revoked = partitions_of(tpl);
                self.tracker.on_revoke(&revoked, self.diagnostics.as_ref());

                if let Err(e) = base_consumer.pause(tpl) {
                    tracing::warn!(error = %e, "failed to pause revoked partitions");
                }

                let unassigned = match rebalance_protocol {
                    RebalanceProtocol::Cooperative => base_consumer.incremental_unassign(tpl),
                    _ => base_consumer.unassign(),
                };
                if let Err(e) = unassigned {
                    tracing::warn!(error = %e, "failed to unassign revoked partitions");
                }
            }
            Rebalance::Assign(tpl) => {
                let assigned_result = match rebalance_protocol {
                    RebalanceProtocol::Cooperative => base_consumer.incremental_assign(tpl),
                    _ => base_consumer.assign(tpl),
                };
                if let Err(e) = assigned_result {
                    tracing::warn!(error = %e, "failed to apply new assignment");
                }

                let assigned = partitions_of(tpl);
                self.tracker.on_assign(&assigned, self.diagnostics.as_ref());
            }
            Rebalance::Error(err) => {
                tracing::warn!(error = %err, "rebalance reported an error");
            }
        }
    }

    fn commit_callback(&self, result: KafkaResult<()>, _offsets: &TopicPartitionList) {
        if let Some(callback) = self.pop_commit_waiter() {
            callback(result.map_err(ClientError::from));
        }
    }
}

/// A `librdkafka`-backed [`KafkaClient`].
pub struct RdKafkaClient {
    consumer: BaseConsumer<RunloopContext>,
}

impl RdKafkaClient {
    pub fn new(consumer: BaseConsumer<RunloopContext>) -> Self {
        Self { consumer }
    }

    fn build_tpl(partitions: &HashSet<TopicPartition>) -> Result<TopicPartitionList, ClientError> {
        let mut tpl = TopicPartitionList::with_capacity(partitions.len());
        for tp in partitions {
            tpl.add_partition(&tp.topic, tp.partition);
        }
        Ok(tpl)
    }
}

impl KafkaClient for RdKafkaClient {
    fn assignment(&mut self) -> Result<HashSet<TopicPartition>, ClientError> {
        let tpl = self.consumer.assignment()?;
        Ok(partitions_of(&tpl))
    }

    fn pause(&mut self, partitions: &HashSet<TopicPartition>) -> Result<(), ClientError> {
        if partitions.is_empty() {
            return Ok(());
        }
        let tpl = Self::build_tpl(partitions)?;
        self.consumer.pause(&tpl)?;
        Ok(())
    }

    fn resume(&mut self, partitions: &HashSet<TopicPartition>) -> Result<(), ClientError> {
        if partitions.is_empty() {
            return Ok(());
        }
        let tpl = Self::build_tpl(partitions)?;
        self.consumer.resume(&tpl)?;
        Ok(())
    }

    fn seek(&mut self, tp: &TopicPartition, offset: Offset) -> Result<(), ClientError> {
        self.consumer
            .seek(&tp.topic, tp.partition, RdOffset::Offset(offset), Timeout::Never)?;
        Ok(())
    }

    fn poll(&mut self, timeout: Duration) -> Result<Option<Vec<Record>>, ClientError> {
        match self.consumer.poll(Timeout::After(timeout)) {
            None => Ok(Some(Vec::new())),
            Some(Ok(msg)) => {
                let tp = TopicPartition::new(msg.topic().to_owned(), msg.partition());
                let record = Record {
                    tp,
                    offset: msg.offset(),
                    key: msg.key().map(|k| bytes::Bytes::copy_from_slice(k)),
                    payload: msg
                        .payload()
                        .map(bytes::Bytes::copy_from_slice)
                        .unwrap_or_default(),
                };
                Ok(Some(vec![record]))
            }
            // Treat "no active subscription yet" the same as "no records"; anything else is a
            // genuine client error that should surface and terminate the runloop.
            Some(Err(rdkafka::error::KafkaError::NoMessageReceived)) => Ok(Some(Vec::new())),
            Some(Err(e)) => Err(e.into()),
        }
    }

    fn commit_async(
        &mut self,
        offsets: &HashMap<TopicPartition, Offset>,
        callback: CommitCallback,
    ) -> Result<(), ClientError> {
        let mut tpl = TopicPartitionList::with_capacity(offsets.len());
        for (tp, mark) in offsets {
            tpl.add_partition_offset(&tp.topic, tp.partition, RdOffset::Offset(*mark))?;
        }

        self.consumer.context().queue_commit_waiter(callback);
        match self
            .consumer
            .commit(&tpl, rdkafka::consumer::CommitMode::Async)
        {
            Ok(()) => Ok(()),
            Err(e) => {
                let client_err = ClientError::from(e);
                if let Some(callback) = self.consumer.context().pop_commit_waiter() {
                    callback(Err(client_err.clone()));
                }
                Err(client_err)
            }
        }
    }
}
