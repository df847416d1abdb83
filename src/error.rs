//! Error types for game-encyclopedia
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur while serving a tool call
#[derive(Debug, Error)]
pub enum GameError {
    /// Resolution produced zero matches
    #[error("Not found: {0}")]
    NotFound(String),

    /// Upstream explicitly reported failure for a valid-looking request
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Network-level failure (timeout, connection reset, DNS)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response without a structured failure body
    #[error("{service} returned HTTP {status}: {message}")]
    HttpStatus {
        service: &'static str,
        status: u16,
        message: String,
    },

    /// Required credential missing at startup
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Tool arguments failed validation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// MCP session could not start or ended abnormally
    #[error("MCP protocol error: {0}")]
    Protocol(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GameError {
    /// True when the upstream answered 404 for the requested resource
    pub fn is_http_not_found(&self) -> bool {
        matches!(self, GameError::HttpStatus { status: 404, .. })
    }
}

/// Result type alias for game-encyclopedia operations
pub type Result<T> = std::result::Result<T, GameError>;
