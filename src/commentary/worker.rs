//! Fire-and-forget commentary requests
//!
//! The session enqueues event contexts; a background task turns each one into
//! a provider call running on its own task. Replies come back over a channel
//! and are only appended to the log when the session drains them, so the log
//! has a single writer.

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::log::{CommentaryLog, LogKind};
use super::provider::{CommentaryProvider, commentate};
use crate::game::GameEvent;

/// System line shown while a reply is outstanding
pub const PENDING_NOTICE: &str = "Parsing neural patterns...";

/// Session-side end of the commentary pipeline
pub struct CommentaryHandle {
    requests: mpsc::UnboundedSender<String>,
    replies: mpsc::UnboundedReceiver<String>,
    log: CommentaryLog,
    worker: JoinHandle<()>,
}

impl CommentaryHandle {
    /// Start the worker on the current tokio runtime
    pub fn spawn<P: CommentaryProvider>(provider: P, retention: Option<usize>) -> Self {
        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run_worker(Arc::new(provider), request_rx, reply_tx));

        Self {
            requests: request_tx,
            replies: reply_rx,
            log: CommentaryLog::new(retention),
            worker,
        }
    }

    /// Ask for commentary on an event without waiting for it
    pub fn request(&mut self, event: &GameEvent) {
        self.log.push(LogKind::System, PENDING_NOTICE);
        if self.requests.send(event.context()).is_err() {
            debug!("commentary worker gone, dropping request");
        }
    }

    /// Add a plain system line to the log
    pub fn note(&mut self, message: impl Into<String>) {
        self.log.push(LogKind::System, message);
    }

    /// Append every reply that has arrived so far; returns how many
    pub fn drain(&mut self) -> usize {
        let mut appended = 0;
        while let Ok(reply) = self.replies.try_recv() {
            self.log.push(LogKind::Ai, reply);
            appended += 1;
        }
        appended
    }

    pub fn clear(&mut self) {
        self.log.clear();
    }

    pub fn log(&self) -> &CommentaryLog {
        &self.log
    }

    /// Wait for the next reply and append it
    #[cfg(test)]
    pub(crate) async fn wait_for_reply(&mut self) -> bool {
        match self.replies.recv().await {
            Some(reply) => {
                self.log.push(LogKind::Ai, reply);
                true
            }
            None => false,
        }
    }
}

impl Drop for CommentaryHandle {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

async fn run_worker<P: CommentaryProvider>(
    provider: Arc<P>,
    mut requests: mpsc::UnboundedReceiver<String>,
    replies: mpsc::UnboundedSender<String>,
) {
    while let Some(context) = requests.recv().await {
        let provider = Arc::clone(&provider);
        let replies = replies.clone();
        tokio::spawn(async move {
            let text = commentate(provider.as_ref(), &context).await;
            // Receiver gone means the session ended; nothing to do
            let _ = replies.send(text);
        });
    }
    debug!("commentary worker stopped");
}
