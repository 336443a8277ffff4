use thiserror::Error;

/// Any failure surfaced by the [`crate::client::KafkaClient`] boundary.
///
/// Kept string-based (rather than wrapping the underlying client error directly) so that
/// `ClientError` stays `Clone`: a single commit failure callback fans the same error out to
/// every completion waiting on that batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("kafka client error: {0}")]
pub struct ClientError(pub String);

impl ClientError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<rdkafka::error::KafkaError> for ClientError {
    fn from(err: rdkafka::error::KafkaError) -> Self {
        ClientError(err.to_string())
    }
}

/// Result of a single partition pull.
#[derive(Error, Debug, Clone)]
pub enum RequestError {
    /// The partition is no longer assigned to us, or the runloop has shut down. Terminal and
    /// non-fatal: the caller should end its stream cleanly.
    #[error("partition no longer assigned, or runloop shut down")]
    Absent,

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Result of a commit request.
#[derive(Error, Debug, Clone)]
pub enum CommitError {
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The runloop shut down with this commit still outstanding. Distinct from `Client` so
    /// callers can tell "the broker rejected it" from "we never found out".
    #[error("runloop shut down before this commit could be acknowledged")]
    ShutdownDiscarded,

    /// The runloop task is gone entirely (e.g. its `JoinHandle` was dropped mid-flight).
    #[error("runloop terminated before this commit could be queued")]
    RunloopGone,
}

/// A failure that escapes the command fold and terminates the runloop.
#[derive(Error, Debug, Clone)]
pub enum RunloopError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("fatal runloop error: {0}")]
    Fatal(String),
}
