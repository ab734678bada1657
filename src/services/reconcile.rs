//! Reconciliation plumbing shared by every network operation.
//!
//! DESIGN
//! ======
//! Fetch-then-commit: an operation marks the global status `Loading`, calls
//! the gateway, interprets the envelope, and only then takes the mirror lock
//! to commit the server's entity. `Operation::finish` is the single exit: it
//! logs, writes `Succeeded` or the failure into the status channel, and
//! hands the result back unchanged.

use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::error::{ErrorCode, SyncError};
use crate::gateway::Envelope;
use crate::state::Store;
use crate::status::{RequestStatus, StatusChannel};

pub(crate) struct Operation {
    id: Uuid,
    name: &'static str,
    status: StatusChannel,
}

impl Operation {
    pub(crate) fn begin(store: &Store, name: &'static str) -> Self {
        let id = Uuid::new_v4();
        debug!(op_id = %id, op = name, "operation started");
        store.status.set_status(RequestStatus::Loading);
        Self { id, name, status: store.status.clone() }
    }

    pub(crate) fn finish<T>(self, result: Result<T, SyncError>) -> Result<T, SyncError> {
        match &result {
            Ok(_) => {
                debug!(op_id = %self.id, op = self.name, "operation succeeded");
                self.status.set_status(RequestStatus::Succeeded);
            }
            Err(e) => {
                let (code, retryable) = (e.error_code(), e.retryable());
                if e.is_transport() {
                    error!(op_id = %self.id, op = self.name, code, retryable, error = %e, "operation failed");
                } else {
                    warn!(op_id = %self.id, op = self.name, code, retryable, error = %e, "operation rejected");
                }
                self.status.fail(e.user_message());
            }
        }
        result
    }
}

/// Unwrap a successful envelope's payload, or turn a non-zero result code
/// into an application failure.
pub(crate) fn accept<D>(envelope: Envelope<D>) -> Result<D, SyncError> {
    if envelope.is_success() {
        return Ok(envelope.data);
    }
    Err(SyncError::Rejected { result_code: envelope.result_code, messages: envelope.messages })
}

/// A success envelope must carry the entity it confirms.
pub(crate) fn require<T>(payload: Option<T>, what: &str) -> Result<T, SyncError> {
    payload.ok_or_else(|| SyncError::Validation(format!("success response without {what}")))
}

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod tests;
