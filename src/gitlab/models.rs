//! Payload records passed through to the GitLab API.
//!
//! These types double as tool argument shapes, so they derive `JsonSchema`
//! and keep GitLab's own snake_case field names.

use rmcp::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};

/// Line anchor for an inline merge request comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Position {
    /// Base commit SHA.
    pub base_sha: String,
    /// Start commit SHA.
    pub start_sha: String,
    /// Head commit SHA.
    pub head_sha: String,
    /// Old file path.
    pub old_path: String,
    /// New file path.
    pub new_path: String,
    /// Position type.
    #[serde(default)]
    pub position_type: PositionType,
    /// Old line number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_line: Option<u64>,
    /// New line number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_line: Option<u64>,
}

/// Kind of diff position. Only text positions are supported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PositionType {
    #[default]
    Text,
}

/// One file operation inside a multi-file commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CommitAction {
    /// Operation to perform on the file.
    pub action: CommitActionKind,
    /// Path of the file in the repository.
    pub file_path: String,
    /// Original path, required for `move`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_path: Option<String>,
    /// File content for `create` and `update`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Content encoding: `text` (default) or `base64`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    /// Last known file commit ID, for conflict detection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_commit_id: Option<String>,
    /// Toggle the execute flag (`chmod` only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execute_filemode: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CommitActionKind {
    Create,
    Delete,
    Move,
    Update,
    Chmod,
}

/// Partial merge request update. Only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MergeRequestUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_event: Option<StateEvent>,
    /// Comma-separated label names; replaces the existing labels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_source_branch: Option<bool>,
}

impl MergeRequestUpdate {
    /// True when no field would be transmitted.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// State transition for a merge request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StateEvent {
    Close,
    Reopen,
}
