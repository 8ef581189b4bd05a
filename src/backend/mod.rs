//! Backend seam - the remote service every tool endpoint lives on
//!
//! This module provides:
//! - `Backend` trait: one JSON GET and URL construction for image endpoints
//! - `HttpBackend`: reqwest implementation
//! - `MockBackend`: scripted implementation for tests

pub mod http;
pub mod mock;

use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;

use crate::error::{Result, ToolhubError};

pub use http::HttpBackend;
pub use mock::{MockBackend, MockReply};

/// Query parameters as ordered name/value pairs (values not yet encoded).
pub type Params = Vec<(String, String)>;

/// Path of the catalog listing endpoint.
pub const CATALOG_PATH: &str = "/api/tools";

/// The remote service behind the catalog and every widget.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Base URL all endpoint paths are joined onto
    fn base_url(&self) -> &str;

    /// Issue one GET to `path` and return the decoded JSON body.
    ///
    /// A failure status is reported as `ToolhubError::Status` unless its
    /// JSON body carries an `error`/`detail` marker, in which case the body
    /// is returned so callers can show the backend's own message.
    async fn get_json(&self, path: &str, params: &[(String, String)]) -> Result<Value>;

    /// Absolute URL for an endpoint, used by widgets that point an image at
    /// the backend instead of fetching data.
    fn url(&self, path: &str, params: &[(String, String)]) -> Result<String> {
        endpoint_url(self.base_url(), path, params)
    }
}

/// Join `base` and `path` and URL-encode `params` into the query string.
pub fn endpoint_url(base: &str, path: &str, params: &[(String, String)]) -> Result<String> {
    if base.trim().is_empty() {
        return Err(ToolhubError::InvalidUrl("empty base URL".to_string()));
    }
    let joined = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
    let parsed = if params.is_empty() {
        Url::parse(&joined)
    } else {
        Url::parse_with_params(&joined, params)
    };
    parsed
        .map(|url| url.to_string())
        .map_err(|e| ToolhubError::InvalidUrl(format!("{}: {}", joined, e)))
}
