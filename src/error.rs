//! Error taxonomy for mirror operations.
//!
//! DESIGN
//! ======
//! Two failure families reach the status channel. Transport failures
//! (network, non-2xx, malformed or invalid payloads) carry diagnostic detail
//! that is logged but never shown; the user sees a generic network message.
//! Application failures are well-formed envelopes with a non-zero result
//! code; the user sees the server's first message. The remaining variants
//! are local guards that fire before any request is sent; their ids go to
//! the log, the user sees a fixed message.

use crate::gateway::GatewayError;

/// Shown for every transport-class failure.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error: check your connection and try again";

/// Shown when the server rejects a request without saying why.
pub const FALLBACK_ERROR_MESSAGE: &str = "Some error occurred";

/// Shown when an operation names a list the mirror no longer holds.
pub const UNKNOWN_LIST_MESSAGE: &str = "This list is no longer available";

/// Shown when an update names an item the mirror no longer holds.
pub const ITEM_NOT_FOUND_MESSAGE: &str = "This task is no longer available";

/// Stable machine-readable code for an error variant.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

// =============================================================================
// SYNC ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The gateway call itself failed.
    #[error("transport failure: {0}")]
    Transport(#[from] GatewayError),

    /// The server answered, but the payload does not have the expected shape.
    #[error("invalid response: {0}")]
    Validation(String),

    /// Well-formed envelope with a non-zero result code.
    #[error("rejected by server (result code {result_code})")]
    Rejected { result_code: i32, messages: Vec<String> },

    /// No item collection is keyed by this list id.
    #[error("unknown list: {0}")]
    UnknownList(String),

    #[error("item {item_id} not found in list {list_id}")]
    ItemNotFound { list_id: String, item_id: String },
}

impl SyncError {
    /// Text for the status channel.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) | Self::Validation(_) => NETWORK_ERROR_MESSAGE.to_owned(),
            Self::Rejected { messages, .. } => messages
                .first()
                .filter(|m| !m.trim().is_empty())
                .cloned()
                .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_owned()),
            Self::UnknownList(_) => UNKNOWN_LIST_MESSAGE.to_owned(),
            Self::ItemNotFound { .. } => ITEM_NOT_FOUND_MESSAGE.to_owned(),
        }
    }

    /// `true` for failures that happened below the envelope layer.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Validation(_))
    }
}

impl ErrorCode for SyncError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Transport(e) => e.error_code(),
            Self::Validation(_) => "E_INVALID_RESPONSE",
            Self::Rejected { .. } => "E_REJECTED",
            Self::UnknownList(_) => "E_UNKNOWN_LIST",
            Self::ItemNotFound { .. } => "E_ITEM_NOT_FOUND",
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Transport(e) => e.retryable(),
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
