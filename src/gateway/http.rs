//! HTTP implementation of [`Gateway`] over the todo-list REST API.
//!
//! Thin `reqwest` wrapper. Every call reads the body as text first so a
//! non-2xx status keeps its body for diagnostics; decoding goes through the
//! pure `parse_body` for testability.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::config::GatewayConfig;
use super::{Envelope, Gateway, GatewayError, ItemData, ItemsPage};
use crate::model::{Item, List, UpdateItemModel};

const API_KEY_HEADER: &str = "api-key";

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpGateway {
    http: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    /// # Errors
    ///
    /// Returns `HttpClientBuild` if a credential is not a valid header value
    /// or the TLS backend cannot be initialized.
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let mut headers = HeaderMap::new();
        if let Some(key) = &config.api_key {
            headers.insert(API_KEY_HEADER, header_value(key)?);
        }
        if let Some(token) = &config.auth_token {
            headers.insert(AUTHORIZATION, header_value(&format!("Bearer {token}"))?);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| GatewayError::HttpClientBuild(e.to_string()))?;

        Ok(Self { http, base_url: config.base_url.clone() })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T, GatewayError> {
        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::Request(e.to_string()))?;
        debug!(status = status.as_u16(), bytes = text.len(), "gateway response");

        if !status.is_success() {
            return Err(GatewayError::Status { status: status.as_u16(), body: text });
        }

        parse_body(&text)
    }
}

fn header_value(raw: &str) -> Result<HeaderValue, GatewayError> {
    HeaderValue::from_str(raw).map_err(|e| GatewayError::HttpClientBuild(format!("invalid header value: {e}")))
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct TitleBody<'a> {
    title: &'a str,
}

// =============================================================================
// PARSING
// =============================================================================

pub(crate) fn parse_body<T: DeserializeOwned>(text: &str) -> Result<T, GatewayError> {
    serde_json::from_str(text).map_err(|e| GatewayError::Parse(e.to_string()))
}

// =============================================================================
// GATEWAY IMPL
// =============================================================================

#[async_trait::async_trait]
impl Gateway for HttpGateway {
    async fn list_all(&self) -> Result<Vec<List>, GatewayError> {
        self.send(self.http.get(self.url("/todo-lists"))).await
    }

    async fn create_list(&self, title: &str) -> Result<Envelope<ItemData<List>>, GatewayError> {
        let request = self.http.post(self.url("/todo-lists")).json(&TitleBody { title });
        self.send(request).await
    }

    async fn rename_list(&self, id: &str, title: &str) -> Result<Envelope, GatewayError> {
        let request = self
            .http
            .put(self.url(&format!("/todo-lists/{id}")))
            .json(&TitleBody { title });
        self.send(request).await
    }

    async fn delete_list(&self, id: &str) -> Result<Envelope, GatewayError> {
        self.send(self.http.delete(self.url(&format!("/todo-lists/{id}"))))
            .await
    }

    async fn list_items(&self, list_id: &str) -> Result<ItemsPage, GatewayError> {
        self.send(self.http.get(self.url(&format!("/todo-lists/{list_id}/tasks"))))
            .await
    }

    async fn create_item(&self, list_id: &str, title: &str) -> Result<Envelope<ItemData<Item>>, GatewayError> {
        let request = self
            .http
            .post(self.url(&format!("/todo-lists/{list_id}/tasks")))
            .json(&TitleBody { title });
        self.send(request).await
    }

    async fn update_item(
        &self,
        list_id: &str,
        item_id: &str,
        model: &UpdateItemModel,
    ) -> Result<Envelope<ItemData<Item>>, GatewayError> {
        let request = self
            .http
            .put(self.url(&format!("/todo-lists/{list_id}/tasks/{item_id}")))
            .json(model);
        self.send(request).await
    }

    async fn delete_item(&self, list_id: &str, item_id: &str) -> Result<Envelope, GatewayError> {
        self.send(
            self.http
                .delete(self.url(&format!("/todo-lists/{list_id}/tasks/{item_id}"))),
        )
        .await
    }
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
