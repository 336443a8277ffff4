use std::time::Duration;

use envconfig::Envconfig;

/// Operational knobs for the runloop. The `offset_retrieval` strategy is not here because its
/// `Manual` variant carries a closure and is supplied programmatically to the spawn
/// constructor instead.
#[derive(Envconfig, Clone, Debug)]
pub struct RunloopConfig {
    /// Interval between synthetic Poll commands, in milliseconds. Bounds rebalance-callback
    /// latency when no partition has outstanding demand.
    #[envconfig(from = "RUNLOOP_POLL_FREQUENCY_MS", default = "200")]
    pub poll_frequency_ms: u64,

    /// Max time to block inside `client.poll` when at least one partition has outstanding
    /// demand.
    #[envconfig(from = "RUNLOOP_POLL_TIMEOUT_MS", default = "500")]
    pub poll_timeout_ms: u64,
}

impl RunloopConfig {
    pub fn poll_frequency(&self) -> Duration {
        Duration::from_millis(self.poll_frequency_ms)
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }
}

#[cfg(test)]
impl Default for RunloopConfig {
    fn default() -> Self {
        Self {
            poll_frequency_ms: 50,
            poll_timeout_ms: 100,
        }
    }
}
