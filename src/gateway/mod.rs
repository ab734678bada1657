//! Remote gateway: the boundary between the mirror and the server.
//!
//! DESIGN
//! ======
//! `Gateway` is the only way the stores reach the network. It returns the
//! server's envelopes untouched: interpreting `resultCode` is the
//! reconciliation layer's job, so a well-formed rejection arrives here as
//! `Ok(envelope)` and only transport problems are `Err`. `HttpGateway` is
//! the production implementation; tests substitute an in-memory fake.

pub mod config;
pub mod http;

use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;
use crate::model::{Item, List, UpdateItemModel};

pub use config::GatewayConfig;
pub use http::HttpGateway;

// =============================================================================
// ERROR
// =============================================================================

/// Transport-level failures. No envelope was obtained.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// A configuration value is unusable.
    #[error("gateway config invalid: {0}")]
    Config(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The request never produced a response.
    #[error("request failed: {0}")]
    Request(String),

    /// The server answered with a non-success HTTP status.
    #[error("unexpected response status {status}")]
    Status { status: u16, body: String },

    /// The response body could not be deserialized.
    #[error("response parse failed: {0}")]
    Parse(String),
}

impl ErrorCode for GatewayError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "E_GATEWAY_CONFIG",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
            Self::Request(_) => "E_REQUEST",
            Self::Status { .. } => "E_RESPONSE_STATUS",
            Self::Parse(_) => "E_RESPONSE_PARSE",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Status { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Validation detail attached to a rejected envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub error: String,
}

/// Server response wrapper. `result_code == 0` means the server accepted
/// the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<D = serde_json::Value> {
    pub result_code: i32,
    #[serde(default)]
    pub messages: Vec<String>,
    #[serde(default)]
    pub fields_errors: Vec<FieldError>,
    #[serde(default)]
    pub data: D,
}

impl<D> Envelope<D> {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result_code == 0
    }
}

/// `data` payload of create/update envelopes. Rejections send `{}`, so the
/// item is optional at the wire level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemData<T> {
    pub item: Option<T>,
}

impl<T> Default for ItemData<T> {
    fn default() -> Self {
        Self { item: None }
    }
}

/// Response of the item listing endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemsPage {
    pub items: Vec<Item>,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub error: Option<String>,
}

// =============================================================================
// GATEWAY TRAIT
// =============================================================================

/// Typed list and item CRUD against the remote API.
#[async_trait::async_trait]
pub trait Gateway: Send + Sync {
    async fn list_all(&self) -> Result<Vec<List>, GatewayError>;

    async fn create_list(&self, title: &str) -> Result<Envelope<ItemData<List>>, GatewayError>;

    async fn rename_list(&self, id: &str, title: &str) -> Result<Envelope, GatewayError>;

    async fn delete_list(&self, id: &str) -> Result<Envelope, GatewayError>;

    async fn list_items(&self, list_id: &str) -> Result<ItemsPage, GatewayError>;

    async fn create_item(&self, list_id: &str, title: &str) -> Result<Envelope<ItemData<Item>>, GatewayError>;

    /// `model` must be complete; the server overwrites every mutable field.
    async fn update_item(
        &self,
        list_id: &str,
        item_id: &str,
        model: &UpdateItemModel,
    ) -> Result<Envelope<ItemData<Item>>, GatewayError>;

    async fn delete_item(&self, list_id: &str, item_id: &str) -> Result<Envelope, GatewayError>;
}
