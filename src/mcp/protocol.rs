//! MCP protocol response helpers.
//!
//! Every invocation produces a `CallToolResult`: pretty-printed JSON text on
//! success, `Error: <message>` text with `isError` set on failure. Failures
//! never escape as protocol errors, so one bad call leaves the session intact.

use rmcp::model::{CallToolResult, Content};
use serde_json::Value;

use crate::error::AppError;

/// Wrap a backend result as a text envelope holding pretty-printed JSON.
pub fn success(value: &Value) -> CallToolResult {
    match serde_json::to_string_pretty(value) {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(e) => failure(&AppError::Json(e)),
    }
}

/// Wrap an error as an error-flagged text envelope.
pub fn failure(err: &AppError) -> CallToolResult {
    CallToolResult::error(vec![Content::text(format!("Error: {}", err))])
}
