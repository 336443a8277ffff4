//! The half of the rebalance story that runs synchronously, inside the client's `poll` call.
//!
//! [`crate::client::RunloopContext`]'s `ConsumerContext::rebalance` override forwards into
//! this tracker plus a [`crate::diagnostics::DiagnosticsSink`], and is the one that actually
//! pauses revoked partitions (it alone gets a `BaseConsumer` handle); this tracker only ever
//! holds the flag and fires the diagnostic.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::diagnostics::{DiagnosticsSink, Event};
use crate::types::TopicPartition;

/// Tracks whether a rebalance is currently in flight. Read by the command fold to decide
/// whether commits should be deferred and whether off-assignment requests should fail fast.
#[derive(Debug, Default)]
pub struct RebalanceTracker {
    rebalancing: AtomicBool,
}

impl RebalanceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_rebalancing(&self) -> bool {
        self.rebalancing.load(Ordering::SeqCst)
    }

    /// Called synchronously from the client's rebalance callback when partitions are revoked.
    /// Pausing is the caller's responsibility (it needs gated access to the client); this only
    /// flips the flag and emits the diagnostic.
    pub(crate) fn on_revoke(&self, revoked: &HashSet<TopicPartition>, diagnostics: &dyn DiagnosticsSink) {
        self.rebalancing.store(true, Ordering::SeqCst);
        diagnostics.emit(Event::RebalanceRevoked(revoked.clone()));
    }

    /// Called synchronously from the client's rebalance callback when partitions are assigned.
    pub(crate) fn on_assign(&self, assigned: &HashSet<TopicPartition>, diagnostics: &dyn DiagnosticsSink) {
        self.rebalancing.store(false, Ordering::SeqCst);
        diagnostics.emit(Event::RebalanceAssigned(assigned.clone()));
    }
}

pub(crate) fn new_tracker() -> Arc<RebalanceTracker> {
    Arc::new(RebalanceTracker::new())
}
