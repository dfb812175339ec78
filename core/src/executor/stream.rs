use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;

use crate::task::TaskResult;

/// Read side of the result queue returned by `Executor::start`.
///
/// Results arrive in completion order. The stream ends once the executor has
/// shut down and every buffered result has been received.
#[derive(Debug)]
pub struct ResultStream {
    rx: mpsc::Receiver<TaskResult>,
}

impl ResultStream {
    pub(crate) fn new(rx: mpsc::Receiver<TaskResult>) -> Self {
        Self { rx }
    }

    pub async fn recv(&mut self) -> Option<TaskResult> {
        self.rx.recv().await
    }

    /// Non-blocking receive; `None` when nothing is buffered right now.
    pub fn try_recv(&mut self) -> Option<TaskResult> {
        self.rx.try_recv().ok()
    }

    /// Receive exactly `n` results, or fewer if the stream ends first.
    pub async fn recv_many(&mut self, n: usize) -> Vec<TaskResult> {
        let mut out = Vec::with_capacity(n);
        while out.len() < n {
            match self.rx.recv().await {
                Some(result) => out.push(result),
                None => break,
            }
        }
        out
    }
}

impl Stream for ResultStream {
    type Item = TaskResult;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}
