//! Gateway configuration parsed from environment variables.

use super::GatewayError;

pub const DEFAULT_BASE_URL: &str = "https://social-network.samuraijs.com/api/1.1";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatewayTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for GatewayTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub auth_token: Option<String>,
    pub timeouts: GatewayTimeouts,
}

impl GatewayConfig {
    /// Config for `base_url` with no credentials and default timeouts.
    ///
    /// # Errors
    ///
    /// Returns `Config` if `base_url` is not an http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, GatewayError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            api_key: None,
            auth_token: None,
            timeouts: GatewayTimeouts::default(),
        })
    }

    /// Build typed gateway config from environment variables.
    ///
    /// Optional:
    /// - `TODOSYNC_BASE_URL`: API root, default [`DEFAULT_BASE_URL`]
    /// - `TODOSYNC_API_KEY`: sent as the `API-KEY` header
    /// - `TODOSYNC_AUTH_TOKEN`: sent as a bearer token
    /// - `TODOSYNC_REQUEST_TIMEOUT_SECS`: default 30
    /// - `TODOSYNC_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns `Config` if the base URL is not an http(s) URL.
    pub fn from_env() -> Result<Self, GatewayError> {
        let raw_url = std::env::var("TODOSYNC_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let base_url = parse_base_url(&raw_url)?;
        let timeouts = GatewayTimeouts {
            request_secs: env_parse_u64("TODOSYNC_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("TODOSYNC_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self {
            base_url,
            api_key: env_non_empty("TODOSYNC_API_KEY"),
            auth_token: env_non_empty("TODOSYNC_AUTH_TOKEN"),
            timeouts,
        })
    }

    /// Like [`GatewayConfig::from_env`], after loading a `.env` file if one exists.
    ///
    /// # Errors
    ///
    /// See [`GatewayConfig::from_env`].
    pub fn load() -> Result<Self, GatewayError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!(error = %e, ".env file ignored");
            }
        }
        Self::from_env()
    }
}

fn parse_base_url(raw: &str) -> Result<String, GatewayError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(GatewayError::Config(format!("base URL must be http(s): {raw}")));
    }
    Ok(trimmed.to_string())
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
