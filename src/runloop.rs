//! The command fold: merges polls, requests, and commits onto a single [`State`] value,
//! serializing every touch of the underlying client through the [`ClientGate`].

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::client::{ClientGate, CommitCallback, KafkaClient};
use crate::config::RunloopConfig;
use crate::diagnostics::{DiagnosticsSink, Event};
use crate::error::{ClientError, CommitError, RequestError, RunloopError};
use crate::hub::{PartitionHub, PartitionStream};
use crate::queues::{Command, CommandQueues};
use crate::rebalance::RebalanceTracker;
use crate::shutdown::ShutdownGate;
use crate::state::State;
use crate::types::{Chunk, CommitCommand, CommittableRecord, Offset, OffsetRetrieval, Record, Request, TopicPartition};

/// What one gated poll produced. Everything after this point runs outside the client lock.
struct PollStep {
    prev_assigned: HashSet<TopicPartition>,
    current_assignment: Option<HashSet<TopicPartition>>,
    records: Option<Vec<Record>>,
    shutdown_observed: bool,
}

pub(crate) struct Runloop<C: KafkaClient> {
    gate: Arc<ClientGate<C>>,
    state: State,
    queues: CommandQueues,
    hub: Arc<PartitionHub>,
    shutdown: ShutdownGate,
    rebalance: Arc<RebalanceTracker>,
    diagnostics: Arc<dyn DiagnosticsSink>,
    config: RunloopConfig,
    offset_retrieval: OffsetRetrieval,
    commit_tx: mpsc::UnboundedSender<CommitCommand>,
    request_tx: mpsc::UnboundedSender<Request>,
}

impl<C: KafkaClient> Runloop<C> {
    pub fn new(
        gate: Arc<ClientGate<C>>,
        queues: CommandQueues,
        hub: Arc<PartitionHub>,
        shutdown: ShutdownGate,
        rebalance: Arc<RebalanceTracker>,
        diagnostics: Arc<dyn DiagnosticsSink>,
        config: RunloopConfig,
        offset_retrieval: OffsetRetrieval,
        commit_tx: mpsc::UnboundedSender<CommitCommand>,
        request_tx: mpsc::UnboundedSender<Request>,
    ) -> Self {
        Self {
            gate,
            state: State::new(),
            queues,
            hub,
            shutdown,
            rebalance,
            diagnostics,
            config,
            offset_retrieval,
            commit_tx,
            request_tx,
        }
    }

    pub async fn run(mut self) {
        loop {
            let cmd = match self.queues.next().await {
                Some(cmd) => cmd,
                None => break,
            };

            if self.shutdown.is_shutdown() {
                self.dispatch_shutdown(cmd);
            } else if let Err(err) = self.dispatch_normal(cmd) {
                self.fail_everything(err);
                break;
            }

            if self.shutdown.is_shutdown()
                && self.state.pending_requests.is_empty()
                && self.state.pending_commits.is_empty()
            {
                break;
            }
        }
    }

    fn dispatch_normal(&mut self, cmd: Command) -> Result<(), RunloopError> {
        match cmd {
            Command::Poll => self.handle_poll(),
            Command::Request(req) => {
                self.handle_request(req);
                Ok(())
            }
            Command::Commit(cmd) => {
                self.handle_commit(cmd);
                Ok(())
            }
        }
    }

    fn dispatch_shutdown(&mut self, cmd: Command) {
        match cmd {
            Command::Poll => self.handle_shutdown_poll(),
            Command::Request(req) => self.handle_shutdown_request(req),
            Command::Commit(cmd) => self.handle_commit(cmd),
        }
    }

    /// §4.6.1
    fn handle_request(&mut self, req: Request) {
        let assignment = self.gate.with_client(|client| client.assignment());
        match assignment {
            Ok(assigned) if !self.rebalance.is_rebalancing() && !assigned.contains(&req.tp) => {
                let _ = req.completion.send(Err(RequestError::Absent));
            }
            _ => self.state.add_request(req),
        }
    }

    /// §4.6.2
    fn handle_commit(&mut self, cmd: CommitCommand) {
        if self.rebalance.is_rebalancing() {
            self.state.add_commit(cmd);
        } else {
            self.do_commit(vec![cmd]);
        }
    }

    /// §4.6.3
    fn do_commit(&mut self, cmds: Vec<CommitCommand>) {
        if cmds.is_empty() {
            return;
        }

        let mut offsets: HashMap<TopicPartition, Offset> = HashMap::new();
        for cmd in &cmds {
            for (tp, offset) in &cmd.offsets {
                let mark = offset + 1;
                offsets
                    .entry(tp.clone())
                    .and_modify(|existing| {
                        if mark > *existing {
                            *existing = mark;
                        }
                    })
                    .or_insert(mark);
            }
        }

        self.diagnostics.emit(Event::CommitStarted(offsets.clone()));

        let diagnostics = Arc::clone(&self.diagnostics);
        let offsets_for_callback = offsets.clone();
        let callback: CommitCallback = Box::new(move |result| match result {
            Ok(()) => {
                diagnostics.emit(Event::CommitSuccess(offsets_for_callback));
                for cmd in cmds {
                    let _ = cmd.completion.send(Ok(()));
                }
            }
            Err(e) => {
                diagnostics.emit(Event::CommitFailure(offsets_for_callback, e.clone()));
                for cmd in cmds {
                    let _ = cmd.completion.send(Err(CommitError::Client(e.clone())));
                }
            }
        });

        // A synchronous failure here means the client already ran `callback` inline before
        // returning `Err`; there is nothing left for us to do but log it.
        if let Err(e) = self.gate.with_client(|client| client.commit_async(&offsets, callback)) {
            tracing::warn!(error = %e, "commit_async failed synchronously");
        }
    }

    /// §4.6.4, steps 1-9: the single critical section.
    fn poll_under_gate(&self, requested: &HashSet<TopicPartition>) -> Result<PollStep, ClientError> {
        let poll_timeout = self.config.poll_timeout();
        let shutdown = self.shutdown.clone();
        let offset_retrieval = &self.offset_retrieval;
        let requested = requested.clone();

        self.gate.with_client(move |client| {
            let prev_assigned = client.assignment()?;

            let resume_set: HashSet<_> = prev_assigned.intersection(&requested).cloned().collect();
            let pause_set: HashSet<_> = prev_assigned.difference(&requested).cloned().collect();
            client.resume(&resume_set)?;
            client.pause(&pause_set)?;

            let timeout = if requested.is_empty() {
                Duration::ZERO
            } else {
                poll_timeout
            };
            let polled = client.poll(timeout)?;

            if shutdown.is_shutdown() {
                let _ = client.pause(&prev_assigned);
                return Ok(PollStep {
                    prev_assigned,
                    current_assignment: None,
                    records: None,
                    shutdown_observed: true,
                });
            }

            let records = match polled {
                None => {
                    return Ok(PollStep {
                        prev_assigned,
                        current_assignment: None,
                        records: None,
                        shutdown_observed: false,
                    });
                }
                Some(records) => records,
            };

            let current = client.assignment()?;

            if let OffsetRetrieval::Manual(seek_fn) = offset_retrieval {
                let newly_assigned: Vec<TopicPartition> =
                    current.difference(&prev_assigned).cloned().collect();
                if !newly_assigned.is_empty() {
                    let seeks = seek_fn(&newly_assigned);
                    for tp in &newly_assigned {
                        if let Some(offset) = seeks.get(tp) {
                            client.seek(tp, *offset)?;
                        }
                    }
                }
            }

            Ok(PollStep {
                prev_assigned,
                current_assignment: Some(current),
                records: Some(records),
                shutdown_observed: false,
            })
        })
    }

    /// §4.6.4 in full: steps 1-9 under the gate, steps 10-15 against `self.state` directly.
    fn handle_poll(&mut self) -> Result<(), RunloopError> {
        let requested: HashSet<TopicPartition> =
            self.state.pending_requests.iter().map(|r| r.tp.clone()).collect();

        let step = self.poll_under_gate(&requested)?;

        if step.shutdown_observed || step.records.is_none() {
            return Ok(());
        }

        let prev_assigned = step.prev_assigned;
        let current = step.current_assignment.expect("checked above");
        let records = step.records.expect("checked above");

        let newly_assigned: HashSet<TopicPartition> =
            current.difference(&prev_assigned).cloned().collect();
        let revoked: HashSet<TopicPartition> = prev_assigned.difference(&current).cloned().collect();

        let mut by_tp: HashMap<TopicPartition, Vec<Record>> = HashMap::new();
        for record in records {
            by_tp.entry(record.tp.clone()).or_default().push(record);
        }

        // Step 8: buffer whatever arrived for partitions nobody asked for.
        let unrequested: HashMap<TopicPartition, Vec<Record>> = by_tp
            .iter()
            .filter(|(tp, _)| !requested.contains(*tp))
            .map(|(tp, recs)| (tp.clone(), recs.clone()))
            .collect();
        self.state.add_buffered_records(unrequested);

        // Step 10: end revoked requests, dropping their buffers.
        let pending = std::mem::take(&mut self.state.pending_requests);
        for req in pending {
            if revoked.contains(&req.tp) {
                self.state.remove_buffered_records_for(&req.tp);
                let _ = req.completion.send(Err(RequestError::Absent));
            } else {
                self.state.pending_requests.push_back(req);
            }
        }

        // Step 11: fulfill whoever now has something. `by_tp.remove` (rather than `.get` +
        // clone) matters when two requests target the same TP: the first survivor in
        // enqueue order drains the fresh batch, so a second pending request for that TP is
        // left with nothing to claim and stays pending rather than receiving a duplicate copy.
        let mut fulfilled = Vec::new();
        let mut not_fulfilled = Vec::new();
        let survivors = std::mem::take(&mut self.state.pending_requests);
        for req in survivors {
            let mut have: Vec<Record> = self
                .state
                .remove_buffered_records_for(&req.tp)
                .map(|buf| buf.into_iter().collect())
                .unwrap_or_default();
            if let Some(fresh) = by_tp.remove(&req.tp) {
                have.extend(fresh);
            }

            if have.is_empty() {
                not_fulfilled.push(req.tp.clone());
                self.state.pending_requests.push_back(req);
            } else {
                fulfilled.push(req.tp.clone());
                let chunk: Chunk<CommittableRecord> = have
                    .into_iter()
                    .map(|record| CommittableRecord::new(record, self.commit_tx.clone()))
                    .collect();
                let _ = req.completion.send(Ok(chunk));
            }
        }

        self.diagnostics.emit(Event::Poll {
            requested,
            fulfilled,
            not_fulfilled,
        });

        // Step 13: hand out streams for anything newly assigned.
        for tp in &newly_assigned {
            let stream = PartitionStream::new(tp.clone(), self.request_tx.clone(), Arc::clone(&self.diagnostics));
            self.hub.offer(tp.clone(), stream);
        }

        // Step 14: flush anything that piled up during the rebalance we just cleared.
        if !self.rebalance.is_rebalancing() {
            let deferred = self.state.take_pending_commits();
            if !deferred.is_empty() {
                self.do_commit(deferred);
            }
        }

        Ok(())
    }

    /// §4.6.5, the Poll arm.
    fn handle_shutdown_poll(&mut self) {
        let pending = std::mem::take(&mut self.state.pending_requests);
        for req in pending {
            self.handle_shutdown_request(req);
        }

        let deferred = self.state.take_pending_commits();
        for cmd in deferred {
            let _ = cmd.completion.send(Err(CommitError::ShutdownDiscarded));
        }
    }

    /// §4.6.5, the Request arm.
    fn handle_shutdown_request(&mut self, req: Request) {
        match self.state.remove_buffered_records_for(&req.tp) {
            Some(buffered) => {
                let chunk: Chunk<CommittableRecord> = buffered
                    .into_iter()
                    .map(|record| CommittableRecord::new(record, self.commit_tx.clone()))
                    .collect();
                let _ = req.completion.send(Ok(chunk));
            }
            None => {
                let _ = req.completion.send(Err(RequestError::Absent));
            }
        }
    }

    fn fail_everything(&mut self, err: RunloopError) {
        let client_err = match &err {
            RunloopError::Client(e) => e.clone(),
            RunloopError::Fatal(msg) => ClientError::new(msg.clone()),
        };
        let cause = Arc::new(err);
        self.hub.fail(Arc::clone(&cause));

        let pending = std::mem::take(&mut self.state.pending_requests);
        for req in pending {
            let _ = req.completion.send(Err(RequestError::Client(client_err.clone())));
        }

        let deferred = self.state.take_pending_commits();
        for cmd in deferred {
            let _ = cmd.completion.send(Err(CommitError::Client(client_err.clone())));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    use tokio::sync::oneshot;

    use crate::diagnostics::NoopDiagnostics;

    #[derive(Default)]
    struct FakeState {
        assignment: HashSet<TopicPartition>,
        paused: HashSet<TopicPartition>,
        poll_queue: std::collections::VecDeque<Option<Vec<Record>>>,
        next_assignment: std::collections::VecDeque<HashSet<TopicPartition>>,
        commits: Vec<HashMap<TopicPartition, Offset>>,
        commit_results: std::collections::VecDeque<Result<(), ClientError>>,
        seeks: Vec<(TopicPartition, Offset)>,
    }

    #[derive(Clone)]
    struct FakeKafkaClient(Arc<StdMutex<FakeState>>);

    impl KafkaClient for FakeKafkaClient {
        fn assignment(&mut self) -> Result<HashSet<TopicPartition>, ClientError> {
            Ok(self.0.lock().unwrap().assignment.clone())
        }

        fn pause(&mut self, partitions: &HashSet<TopicPartition>) -> Result<(), ClientError> {
            self.0.lock().unwrap().paused.extend(partitions.iter().cloned());
            Ok(())
        }

        fn resume(&mut self, partitions: &HashSet<TopicPartition>) -> Result<(), ClientError> {
            let mut guard = self.0.lock().unwrap();
            for p in partitions {
                guard.paused.remove(p);
            }
            Ok(())
        }

        fn seek(&mut self, tp: &TopicPartition, offset: Offset) -> Result<(), ClientError> {
            self.0.lock().unwrap().seeks.push((tp.clone(), offset));
            Ok(())
        }

        fn poll(&mut self, _timeout: Duration) -> Result<Option<Vec<Record>>, ClientError> {
            let mut guard = self.0.lock().unwrap();
            if let Some(next) = guard.next_assignment.pop_front() {
                guard.assignment = next;
            }
            Ok(guard.poll_queue.pop_front().unwrap_or(Some(Vec::new())))
        }

        fn commit_async(
            &mut self,
            offsets: &HashMap<TopicPartition, Offset>,
            callback: CommitCallback,
        ) -> Result<(), ClientError> {
            let mut guard = self.0.lock().unwrap();
            guard.commits.push(offsets.clone());
            // The fake resolves every commit inline rather than waiting for a later poll;
            // real clients only promise the callback fires from *some* future poll.
            let result = guard.commit_results.pop_front().unwrap_or(Ok(()));
            drop(guard);
            callback(result.clone());
            result
        }
    }

    fn tp(name: &str, partition: i32) -> TopicPartition {
        TopicPartition::new(name, partition)
    }

    fn record(t: &TopicPartition, offset: Offset) -> Record {
        Record {
            tp: t.clone(),
            offset,
            key: None,
            payload: bytes::Bytes::from_static(b"payload"),
        }
    }

    fn request(t: &TopicPartition) -> (Request, oneshot::Receiver<Result<Chunk<CommittableRecord>, RequestError>>) {
        let (completion, rx) = oneshot::channel();
        (
            Request {
                tp: t.clone(),
                completion,
            },
            rx,
        )
    }

    fn make_runloop(
        fake_state: Arc<StdMutex<FakeState>>,
        rebalance: Arc<RebalanceTracker>,
    ) -> Runloop<FakeKafkaClient> {
        let gate = Arc::new(ClientGate::new(FakeKafkaClient(fake_state)));
        // A poll_frequency this long never fires during a test; these tests drive the fold
        // methods directly rather than through the select! loop.
        let (queues, senders) = CommandQueues::new(Duration::from_secs(3600));
        let hub = Arc::new(PartitionHub::new());
        let shutdown = ShutdownGate::new();
        let diagnostics: Arc<dyn DiagnosticsSink> = Arc::new(NoopDiagnostics);

        Runloop::new(
            gate,
            queues,
            hub,
            shutdown,
            rebalance,
            diagnostics,
            RunloopConfig::default(),
            OffsetRetrieval::Auto,
            senders.commits,
            senders.requests,
        )
    }

    #[tokio::test]
    async fn scenario1_fresh_poll_fulfills_a_pending_request() {
        let a = tp("orders", 0);
        let state = Arc::new(StdMutex::new(FakeState {
            assignment: [a.clone()].into_iter().collect(),
            poll_queue: [Some(vec![record(&a, 0), record(&a, 1)])].into_iter().collect(),
            ..Default::default()
        }));
        let mut rl = make_runloop(state, Arc::new(RebalanceTracker::new()));

        let (req, rx) = request(&a);
        rl.handle_request(req);
        rl.handle_poll().unwrap();

        let chunk = rx.await.unwrap().expect("should fulfill");
        assert_eq!(chunk.len(), 2);
        assert_eq!(chunk[0].record().offset, 0);
        assert_eq!(chunk[1].record().offset, 1);
        assert!(rl.state.buffered_records.is_empty());
    }

    #[tokio::test]
    async fn scenario2_unrequested_partition_buffers_and_a_later_poll_drains_it() {
        let a = tp("orders", 0);
        let b = tp("orders", 1);
        let state = Arc::new(StdMutex::new(FakeState {
            assignment: [a.clone(), b.clone()].into_iter().collect(),
            poll_queue: [Some(vec![record(&a, 0), record(&b, 0)]), Some(vec![])]
                .into_iter()
                .collect(),
            ..Default::default()
        }));
        let mut rl = make_runloop(state, Arc::new(RebalanceTracker::new()));

        let (req_a, rx_a) = request(&a);
        rl.handle_request(req_a);
        rl.handle_poll().unwrap();

        let chunk_a = rx_a.await.unwrap().expect("A should fulfill");
        assert_eq!(chunk_a.len(), 1);
        assert_eq!(chunk_a[0].record().offset, 0);
        assert_eq!(rl.state.buffered_records[&b].len(), 1);

        let (req_b, rx_b) = request(&b);
        rl.handle_request(req_b);
        rl.handle_poll().unwrap();

        let chunk_b = rx_b.await.unwrap().expect("B should fulfill from buffer alone");
        assert_eq!(chunk_b.len(), 1);
        assert_eq!(chunk_b[0].record().offset, 0);
        assert!(!rl.state.buffered_records.contains_key(&b));
    }

    #[tokio::test]
    async fn scenario3_revoke_resolves_pending_requests_absent_and_drops_the_buffer() {
        let a = tp("orders", 0);
        let state = Arc::new(StdMutex::new(FakeState {
            assignment: [a.clone()].into_iter().collect(),
            poll_queue: [Some(vec![])].into_iter().collect(),
            next_assignment: [HashSet::new()].into_iter().collect(),
            ..Default::default()
        }));
        let mut rl = make_runloop(state, Arc::new(RebalanceTracker::new()));

        let (req, rx) = request(&a);
        rl.handle_request(req);
        rl.handle_poll().unwrap();

        let result = rx.await.unwrap();
        assert!(matches!(result, Err(RequestError::Absent)));
        assert!(!rl.state.buffered_records.contains_key(&a));
    }

    #[tokio::test]
    async fn scenario4_commits_defer_during_rebalance_then_flush_on_next_poll() {
        let a = tp("orders", 0);
        let fake_state = Arc::new(StdMutex::new(FakeState {
            assignment: [a.clone()].into_iter().collect(),
            poll_queue: [Some(vec![])].into_iter().collect(),
            ..Default::default()
        }));
        let rebalance = Arc::new(RebalanceTracker::new());
        let mut rl = make_runloop(Arc::clone(&fake_state), Arc::clone(&rebalance));

        rebalance.on_revoke(&[a.clone()].into_iter().collect(), &NoopDiagnostics);

        let (completion, rx) = oneshot::channel();
        let mut offsets = HashMap::new();
        offsets.insert(a.clone(), 9);
        rl.handle_commit(CommitCommand {
            offsets,
            completion,
        });
        assert_eq!(rl.state.pending_commits.len(), 1);
        assert!(fake_state.lock().unwrap().commits.is_empty());

        rebalance.on_assign(&[a.clone()].into_iter().collect(), &NoopDiagnostics);
        rl.handle_poll().unwrap();

        assert!(rl.state.pending_commits.is_empty());
        assert_eq!(fake_state.lock().unwrap().commits, vec![[(a.clone(), 10)].into_iter().collect()]);
        rx.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn scenario5_aggregation_takes_the_higher_offset_plus_one() {
        let a = tp("orders", 0);
        let fake_state = Arc::new(StdMutex::new(FakeState::default()));
        let mut rl = make_runloop(fake_state.clone(), Arc::new(RebalanceTracker::new()));

        let (c1, _r1) = oneshot::channel();
        let (c2, _r2) = oneshot::channel();
        let cmd_low = CommitCommand {
            offsets: [(a.clone(), 3)].into_iter().collect(),
            completion: c1,
        };
        let cmd_high = CommitCommand {
            offsets: [(a.clone(), 7)].into_iter().collect(),
            completion: c2,
        };
        rl.do_commit(vec![cmd_low, cmd_high]);

        assert_eq!(
            fake_state.lock().unwrap().commits,
            vec![[(a.clone(), 8)].into_iter().collect()]
        );
    }

    #[tokio::test]
    async fn scenario6_graceful_shutdown_drains_buffer_then_ends_the_rest() {
        let a = tp("orders", 0);
        let b = tp("orders", 1);
        let fake_state = Arc::new(StdMutex::new(FakeState::default()));
        let mut rl = make_runloop(fake_state, Arc::new(RebalanceTracker::new()));
        rl.state
            .add_buffered_records([(a.clone(), vec![record(&a, 0)])].into_iter().collect());

        let (req_a, rx_a) = request(&a);
        let (req_b, rx_b) = request(&b);
        rl.handle_shutdown_request(req_a);
        rl.handle_shutdown_request(req_b);

        let chunk_a = rx_a.await.unwrap().expect("A has a buffer");
        assert_eq!(chunk_a.len(), 1);
        assert!(matches!(rx_b.await.unwrap(), Err(RequestError::Absent)));
    }

    #[tokio::test]
    async fn shutdown_poll_resolves_deferred_commits_as_shutdown_discarded() {
        let fake_state = Arc::new(StdMutex::new(FakeState::default()));
        let mut rl = make_runloop(fake_state, Arc::new(RebalanceTracker::new()));

        let (completion, rx) = oneshot::channel();
        rl.state.add_commit(CommitCommand {
            offsets: HashMap::new(),
            completion,
        });

        rl.handle_shutdown_poll();

        assert!(matches!(rx.await.unwrap(), Err(CommitError::ShutdownDiscarded)));
    }

    #[tokio::test]
    async fn p6_back_pressure_pauses_every_assigned_partition_with_no_demand() {
        let a = tp("orders", 0);
        let b = tp("orders", 1);
        let fake_state = Arc::new(StdMutex::new(FakeState {
            assignment: [a.clone(), b.clone()].into_iter().collect(),
            poll_queue: [Some(vec![])].into_iter().collect(),
            ..Default::default()
        }));
        let mut rl = make_runloop(Arc::clone(&fake_state), Arc::new(RebalanceTracker::new()));

        rl.handle_poll().unwrap();

        assert_eq!(fake_state.lock().unwrap().paused, [a, b].into_iter().collect());
    }

    #[tokio::test]
    async fn two_pending_requests_for_the_same_tp_are_not_coalesced() {
        let a = tp("orders", 0);
        let state = Arc::new(StdMutex::new(FakeState {
            assignment: [a.clone()].into_iter().collect(),
            poll_queue: [Some(vec![record(&a, 0)])].into_iter().collect(),
            ..Default::default()
        }));
        let mut rl = make_runloop(state, Arc::new(RebalanceTracker::new()));

        let (req1, rx1) = request(&a);
        let (req2, rx2) = request(&a);
        rl.handle_request(req1);
        rl.handle_request(req2);
        rl.handle_poll().unwrap();

        let chunk1 = rx1.await.unwrap().expect("first enqueued should fulfill");
        assert_eq!(chunk1.len(), 1);
        assert_eq!(chunk1[0].record().offset, 0);

        // The second request sees no leftover records and stays pending rather than
        // receiving a duplicate copy of the first request's chunk.
        assert_eq!(rl.state.pending_requests.len(), 1);
        assert!(rx2.try_recv().is_err());
    }
}
