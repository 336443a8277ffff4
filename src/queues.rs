//! The three command sources the runloop merges: a poll ticker, a request queue, and a
//! commit queue.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, Interval, MissedTickBehavior};

use crate::types::{CommitCommand, Request};

/// One unit of work for the command fold.
pub(crate) enum Command {
    Poll,
    Request(Request),
    Commit(CommitCommand),
}

/// The producer-side handles a caller needs to enqueue work. Cloning either sender is cheap;
/// every [`crate::hub::PartitionStream`] and every [`crate::types::CommittableRecord`] holds
/// its own clone.
#[derive(Clone)]
pub(crate) struct CommandSenders {
    pub requests: mpsc::UnboundedSender<Request>,
    pub commits: mpsc::UnboundedSender<CommitCommand>,
}

/// Owns the consumer side of all three sources. Lives entirely inside the runloop task.
pub(crate) struct CommandQueues {
    requests_rx: mpsc::UnboundedReceiver<Request>,
    commits_rx: mpsc::UnboundedReceiver<CommitCommand>,
    ticker: Interval,
    requests_closed: bool,
    commits_closed: bool,
}

impl CommandQueues {
    pub fn new(poll_frequency: Duration) -> (Self, CommandSenders) {
        let (requests_tx, requests_rx) = mpsc::unbounded_channel();
        let (commits_tx, commits_rx) = mpsc::unbounded_channel();

        let mut ticker = time::interval(poll_frequency);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        (
            Self {
                requests_rx,
                commits_rx,
                ticker,
                requests_closed: false,
                commits_closed: false,
            },
            CommandSenders {
                requests: requests_tx,
                commits: commits_tx,
            },
        )
    }

    /// Waits for the next command from whichever source is ready first. `select!`'s default
    /// branch selection is pseudo-random among ready branches, giving the weak round-robin
    /// fairness the fold relies on: no source can starve another indefinitely.
    ///
    /// Returns `None` once every producer has been dropped (the Handle and every outstanding
    /// stream are gone). That is the runloop's cue to terminate even without an explicit
    /// shutdown.
    pub async fn next(&mut self) -> Option<Command> {
        loop {
            if self.requests_closed && self.commits_closed {
                return None;
            }
            tokio::select! {
                _ = self.ticker.tick() => return Some(Command::Poll),
                req = self.requests_rx.recv(), if !self.requests_closed => {
                    match req {
                        Some(r) => return Some(Command::Request(r)),
                        None => self.requests_closed = true,
                    }
                }
                cmd = self.commits_rx.recv(), if !self.commits_closed => {
                    match cmd {
                        Some(c) => return Some(Command::Commit(c)),
                        None => self.commits_closed = true,
                    }
                }
            }
        }
    }
}
