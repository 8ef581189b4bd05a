//! Error types for toolhub
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur while talking to the tool backend
#[derive(Debug, Error)]
pub enum ToolhubError {
    /// Transport-level failure (connect, DNS, read)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a failure status and no error payload
    #[error("Request failed (HTTP {0})")]
    Status(u16),

    /// The backend answered with something that is not usable JSON
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Base URL or endpoint path could not form a URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// No tool with this slug in the catalog or registry
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// A widget field name or value was rejected
    #[error("Invalid field: {0}")]
    InvalidField(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for toolhub operations
pub type Result<T> = std::result::Result<T, ToolhubError>;
