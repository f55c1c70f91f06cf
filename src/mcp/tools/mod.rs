//! MCP tool implementations organized by domain.
//!
//! Each module exposes `tools()`, returning its [`ToolSet`]. The order of
//! [`all`] is the registry order.

pub mod branches;
pub mod commits;
pub mod discussions;
pub mod files;
pub mod issues;
pub mod merge_requests;
pub mod repository;

use serde::{Deserialize, Deserializer};

use crate::mcp::registry::ToolSet;

/// Every domain's tool set, in registry order.
pub fn all() -> Vec<ToolSet> {
    vec![
        repository::tools(),
        branches::tools(),
        merge_requests::tools(),
        files::tools(),
        discussions::tools(),
        commits::tools(),
        issues::tools(),
    ]
}

// ============================================================================
// Shared defaults
// ============================================================================

pub(crate) fn default_branch() -> String {
    "main".to_string()
}

pub(crate) fn default_state() -> String {
    "opened".to_string()
}

pub(crate) fn default_true() -> bool {
    true
}

// An explicit `null` or `""` falls back to the same default as a missing key.
// Pair each with the matching `default = "..."` so the schema advertises it.

pub(crate) fn branch_or_default<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(non_empty(Option::deserialize(d)?).unwrap_or_else(default_branch))
}

pub(crate) fn state_or_default<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(non_empty(Option::deserialize(d)?).unwrap_or_else(default_state))
}

pub(crate) fn true_unless_false<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(Option::deserialize(d)?.unwrap_or_else(default_true))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
