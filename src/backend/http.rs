//! reqwest implementation of the `Backend` trait

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::error::{Result, ToolhubError};
use crate::widgets::error_marker;

use super::{Backend, endpoint_url};

/// Default User-Agent header sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("toolhub/", env!("CARGO_PKG_VERSION"));

/// HTTP client options
#[derive(Debug, Clone)]
pub struct HttpOptions {
    /// Per-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Backend reached over HTTP
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a backend for `base_url` with default options
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_options(base_url, HttpOptions::default())
    }

    /// Create a backend with explicit client options
    pub fn with_options(base_url: impl Into<String>, options: HttpOptions) -> Result<Self> {
        let base_url = base_url.into();
        // Validate the base once so every later failure is a per-request one
        endpoint_url(&base_url, "/", &[])?;

        let mut builder = Client::builder().user_agent(options.user_agent);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl Backend for HttpBackend {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json(&self, path: &str, params: &[(String, String)]) -> Result<Value> {
        let url = endpoint_url(&self.base_url, path, params)?;
        log::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        match response.json::<Value>().await {
            // A failure status only passes through when the body says what went wrong
            Ok(value) if !status.is_success() => match error_marker(&value) {
                Some(msg) => {
                    log::warn!("GET {} returned {}: {}", path, status, msg);
                    Ok(value)
                }
                None => Err(ToolhubError::Status(status.as_u16())),
            },
            Ok(value) => Ok(value),
            Err(e) if e.is_decode() && !status.is_success() => Err(ToolhubError::Status(status.as_u16())),
            Err(e) if e.is_decode() => Err(ToolhubError::InvalidResponse(format!(
                "{} returned a non-JSON body: {}",
                path, e
            ))),
            Err(e) => Err(e.into()),
        }
    }
}
