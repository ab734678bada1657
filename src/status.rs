//! Status channel: global request status plus the last user-facing error.
//!
//! DESIGN
//! ======
//! Backed by a `tokio::sync::watch` channel so readers get a consistent
//! snapshot (or await the next change) instead of peeking at a live cell.
//! Writers from concurrent operations race last-write-wins; that only
//! affects the coarse loading indicator, never entity data.

use std::sync::Arc;

use tokio::sync::watch;

/// Coarse, process-wide request indicator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Point-in-time copy of the channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub status: RequestStatus,
    /// Last error message; stays until the UI clears it.
    pub error: Option<String>,
}

#[derive(Clone)]
pub struct StatusChannel {
    tx: Arc<watch::Sender<StatusSnapshot>>,
}

impl StatusChannel {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(StatusSnapshot::default());
        Self { tx: Arc::new(tx) }
    }

    #[must_use]
    pub fn snapshot(&self) -> StatusSnapshot {
        self.tx.borrow().clone()
    }

    /// Receiver that observes every subsequent write.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<StatusSnapshot> {
        self.tx.subscribe()
    }

    pub fn set_status(&self, status: RequestStatus) {
        self.tx.send_modify(|s| s.status = status);
    }

    pub fn set_error(&self, error: Option<String>) {
        self.tx.send_modify(|s| s.error = error);
    }

    /// Record a failure: status and message in one write.
    pub fn fail(&self, message: String) {
        self.tx.send_modify(|s| {
            s.status = RequestStatus::Failed;
            s.error = Some(message);
        });
    }

    /// Acknowledge the current error.
    pub fn clear_error(&self) {
        self.set_error(None);
    }

    pub fn reset(&self) {
        self.tx.send_replace(StatusSnapshot::default());
    }
}

impl Default for StatusChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
