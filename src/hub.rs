//! The sink of `(topic-partition, record-stream)` pairs handed to the user, and the lazy,
//! demand-driven stream each pair carries.

use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use async_stream::stream;
use futures::Stream;
use tokio::sync::{mpsc, oneshot};
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_stream::StreamExt;

use crate::diagnostics::{DiagnosticsSink, Event};
use crate::error::{RequestError, RunloopError};
use crate::types::{CommittableRecord, Request, TopicPartition};

/// One item offered to the hub: a fresh partition stream, or a terminal signal.
pub(crate) enum Take<T> {
    Value(T),
    End,
    Fail(Arc<RunloopError>),
}

/// A lazy, pull-driven sequence of records for one partition. Each poll of the underlying
/// stream issues a fresh [`Request`] to the runloop and awaits its resolution; there is no
/// internal buffering beyond what a single in-flight request carries.
pub struct PartitionStream {
    inner: Pin<Box<dyn Stream<Item = Result<CommittableRecord, RequestError>> + Send>>,
}

impl PartitionStream {
    pub(crate) fn new(
        tp: TopicPartition,
        request_tx: mpsc::UnboundedSender<Request>,
        diagnostics: Arc<dyn DiagnosticsSink>,
    ) -> Self {
        let inner = stream! {
            loop {
                let (completion, rx) = oneshot::channel();
                if request_tx.send(Request { tp: tp.clone(), completion }).is_err() {
                    break;
                }
                diagnostics.emit(Event::Request(tp.clone()));

                match rx.await {
                    Ok(Ok(chunk)) => {
                        for record in chunk {
                            yield Ok(record);
                        }
                    }
                    Ok(Err(RequestError::Absent)) => break,
                    Ok(Err(other)) => {
                        yield Err(other);
                        break;
                    }
                    // The runloop dropped the promise without resolving it (task exit mid-flight).
                    // Indistinguishable from Absent at this edge.
                    Err(_) => break,
                }
            }
        };
        Self {
            inner: Box::pin(inner),
        }
    }
}

impl Stream for PartitionStream {
    type Item = Result<CommittableRecord, RequestError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

/// Owns the producer side of the hub (held by the runloop) and the single-consumer side
/// (handed out once via [`PartitionHub::take_stream`]).
pub(crate) struct PartitionHub {
    tx: mpsc::UnboundedSender<Take<(TopicPartition, PartitionStream)>>,
    rx: Mutex<Option<mpsc::UnboundedReceiver<Take<(TopicPartition, PartitionStream)>>>>,
}

impl PartitionHub {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx: Mutex::new(Some(rx)),
        }
    }

    pub fn offer(&self, tp: TopicPartition, stream: PartitionStream) {
        let _ = self.tx.send(Take::Value((tp, stream)));
    }

    pub fn end(&self) {
        let _ = self.tx.send(Take::End);
    }

    pub fn fail(&self, cause: Arc<RunloopError>) {
        let _ = self.tx.send(Take::Fail(cause));
    }

    /// Returns the user-facing stream of assigned partitions. The stream stops yielding after
    /// the first `End` (silently) or `Fail` (after surfacing the error once).
    ///
    /// # Panics
    /// Panics if called more than once: the receiver is a single-consumer resource.
    pub fn take_stream(
        &self,
    ) -> impl Stream<Item = Result<(TopicPartition, PartitionStream), Arc<RunloopError>>> {
        let rx = self
            .rx
            .lock()
            .unwrap()
            .take()
            .expect("partitions_stream() may only be called once");
        let mut rx = UnboundedReceiverStream::new(rx);
        stream! {
            while let Some(take) = rx.next().await {
                match take {
                    Take::Value(v) => yield Ok(v),
                    Take::End => break,
                    Take::Fail(e) => {
                        yield Err(e);
                        break;
                    }
                }
            }
        }
    }
}
