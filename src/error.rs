//! Application error types.

use thiserror::Error;

/// Application-level errors for the GitLab MCP server.
#[derive(Error, Debug)]
pub enum AppError {
    // Startup errors
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Duplicate tool name registered: {0}")]
    DuplicateTool(String),

    // Routing errors
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for tool '{tool}': {message}")]
    InvalidParams { tool: String, message: String },

    // Backend errors
    #[error("GitLab API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("'{0}' cannot be addressed as a URL path segment")]
    UnaddressablePath(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to decode file content: {0}")]
    Decode(#[from] base64::DecodeError),
}

impl AppError {
    /// Build an API error from a non-success status and the raw response body.
    ///
    /// GitLab reports failures as `{"message": ...}` or `{"error": ...}`; the
    /// message may itself be an object (field validation errors), in which case
    /// it is rendered as compact JSON. Non-JSON bodies are kept verbatim.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<serde_json::Value>(body) {
            Ok(value) => match value.get("message").or_else(|| value.get("error")) {
                Some(serde_json::Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => value.to_string(),
            },
            Err(_) if body.trim().is_empty() => "empty response body".to_string(),
            Err(_) => body.trim().to_string(),
        };

        Self::Api { status, message }
    }
}
