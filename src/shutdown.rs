use std::sync::atomic::{AtomicBool, Ordering};

use tokio_util::sync::CancellationToken;

/// Idempotent shutdown flag. The `AtomicBool` lets `handle_poll`/`handle_request` check
/// shutdown without going through the command channel; the `CancellationToken` lets other
/// tasks (e.g. the one that owns the `RunloopHandle`) await shutdown without polling.
#[derive(Debug, Default, Clone)]
pub(crate) struct ShutdownGate {
    flag: std::sync::Arc<AtomicBool>,
    token: CancellationToken,
}

impl ShutdownGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_shutdown(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Sets the flag. Returns `true` if this call performed the transition (i.e. is the first
    /// caller), `false` if shutdown was already in progress.
    pub fn trigger(&self) -> bool {
        let was_set = self.flag.swap(true, Ordering::SeqCst);
        if !was_set {
            self.token.cancel();
        }
        !was_set
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }
}
