//! The runloop's sole mutable value. Every transition here is a plain, synchronous data
//! structure update: no I/O, no suspension.

use std::collections::{HashMap, VecDeque};

use crate::types::{CommitCommand, Record, Request, TopicPartition};

#[derive(Default)]
pub(crate) struct State {
    pub pending_requests: VecDeque<Request>,
    pub pending_commits: Vec<CommitCommand>,
    pub buffered_records: HashMap<TopicPartition, VecDeque<Record>>,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_request(&mut self, req: Request) {
        self.pending_requests.push_back(req);
    }

    pub fn add_commit(&mut self, cmd: CommitCommand) {
        self.pending_commits.push(cmd);
    }

    /// Appends each partition's fresh records after whatever it already has buffered,
    /// preserving arrival order. Never leaves an empty entry behind.
    pub fn add_buffered_records(&mut self, mut fresh: HashMap<TopicPartition, Vec<Record>>) {
        for (tp, records) in fresh.drain() {
            if records.is_empty() {
                continue;
            }
            self.buffered_records
                .entry(tp)
                .or_default()
                .extend(records);
        }
    }

    /// Removes and returns whatever is buffered for `tp`, if anything.
    pub fn remove_buffered_records_for(&mut self, tp: &TopicPartition) -> Option<VecDeque<Record>> {
        self.buffered_records.remove(tp)
    }

    /// Drains `pending_commits`, leaving it empty.
    pub fn take_pending_commits(&mut self) -> Vec<CommitCommand> {
        std::mem::take(&mut self.pending_commits)
    }

    #[cfg(test)]
    pub fn invariants_hold(&self) -> bool {
        let no_empty_buffers = self.buffered_records.values().all(|v| !v.is_empty());
        let no_overlap = self.buffered_records.keys().all(|tp| {
            !self
                .pending_requests
                .iter()
                .any(|r| &r.tp == tp)
        });
        no_empty_buffers && no_overlap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RequestError;
    use tokio::sync::oneshot;

    fn tp(p: i32) -> TopicPartition {
        TopicPartition::new("orders", p)
    }

    fn record(p: i32, offset: i64) -> Record {
        Record {
            tp: tp(p),
            offset,
            key: None,
            payload: bytes::Bytes::new(),
        }
    }

    fn request(p: i32) -> (Request, oneshot::Receiver<Result<crate::types::Chunk<crate::types::CommittableRecord>, RequestError>>) {
        let (completion, rx) = oneshot::channel();
        (Request { tp: tp(p), completion }, rx)
    }

    #[test]
    fn add_buffered_records_skips_empty_batches() {
        let mut state = State::new();
        let mut batch = HashMap::new();
        batch.insert(tp(0), vec![]);
        state.add_buffered_records(batch);
        assert!(state.buffered_records.is_empty());
        assert!(state.invariants_hold());
    }

    #[test]
    fn add_buffered_records_preserves_arrival_order() {
        let mut state = State::new();
        let mut first = HashMap::new();
        first.insert(tp(0), vec![record(0, 0), record(0, 1)]);
        state.add_buffered_records(first);

        let mut second = HashMap::new();
        second.insert(tp(0), vec![record(0, 2)]);
        state.add_buffered_records(second);

        let buffered: Vec<_> = state.buffered_records[&tp(0)]
            .iter()
            .map(|r| r.offset)
            .collect();
        assert_eq!(buffered, vec![0, 1, 2]);
    }

    #[test]
    fn pending_requests_preserve_per_tp_fifo_order() {
        let mut state = State::new();
        let (r1, _rx1) = request(0);
        let (r2, _rx2) = request(0);
        state.add_request(r1);
        state.add_request(r2);
        let order: Vec<_> = state.pending_requests.iter().map(|r| r.tp.clone()).collect();
        assert_eq!(order, vec![tp(0), tp(0)]);
    }

    #[test]
    fn remove_buffered_records_drops_the_entry_entirely() {
        let mut state = State::new();
        let mut batch = HashMap::new();
        batch.insert(tp(0), vec![record(0, 0)]);
        state.add_buffered_records(batch);

        let removed = state.remove_buffered_records_for(&tp(0));
        assert!(removed.is_some());
        assert!(!state.buffered_records.contains_key(&tp(0)));
    }

    #[test]
    fn take_pending_commits_drains_the_list() {
        let mut state = State::new();
        let (completion, _rx) = oneshot::channel();
        state.add_commit(CommitCommand {
            offsets: HashMap::new(),
            completion,
        });
        assert_eq!(state.pending_commits.len(), 1);
        let drained = state.take_pending_commits();
        assert_eq!(drained.len(), 1);
        assert!(state.pending_commits.is_empty());
    }
}
