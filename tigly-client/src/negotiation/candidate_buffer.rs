use crate::error::NegotiationError;
use std::future::Future;
use tracing::{debug, warn};

/// Queue for connectivity candidates that arrive before the remote
/// description is applied. Append-only until flushed; flushed exactly once
/// per negotiation, in arrival order.
#[derive(Default)]
pub struct CandidateBuffer {
    pending: Vec<serde_json::Value>,
}

impl CandidateBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, candidate: serde_json::Value) {
        self.pending.push(candidate);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Applies every buffered candidate in FIFO order, awaiting each
    /// application before the next. An individual candidate failing is
    /// logged and skipped; the flush always drains the whole buffer.
    pub async fn flush<F, Fut>(&mut self, mut apply: F)
    where
        F: FnMut(serde_json::Value) -> Fut,
        Fut: Future<Output = Result<(), NegotiationError>>,
    {
        let pending = std::mem::take(&mut self.pending);
        if pending.is_empty() {
            return;
        }
        debug!(count = pending.len(), "flushing buffered candidates");
        for candidate in pending {
            if let Err(e) = apply(candidate).await {
                warn!(error = %e, "buffered candidate rejected, skipping");
            }
        }
    }
}
