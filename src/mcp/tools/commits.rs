//! Commit history and multi-file commit tools.

use std::sync::Arc;

use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::Value;

use crate::error::AppError;
use crate::gitlab::models::CommitAction;
use crate::gitlab::GitLabClient;
use crate::mcp::registry::{ToolEntry, ToolSet};

// ============================================================================
// Parameter Types
// ============================================================================

/// Parameters for list_commits tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListCommitsParams {
    /// Project ID or path.
    pub project_id: String,
    /// Only list commits reachable from this branch (optional).
    #[serde(default)]
    pub branch: Option<String>,
}

/// Parameters for create_commit tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommitParams {
    /// Project ID or path.
    pub project_id: String,
    /// Branch to commit to.
    pub branch: String,
    /// Commit message.
    pub commit_message: String,
    /// File operations applied in one commit.
    pub actions: Vec<CommitAction>,
}

// ============================================================================
// Handlers
// ============================================================================

async fn list_commits(
    client: Arc<GitLabClient>,
    params: ListCommitsParams,
) -> Result<Value, AppError> {
    client
        .get_commits(&params.project_id, params.branch.as_deref())
        .await
}

async fn create_commit(
    client: Arc<GitLabClient>,
    params: CreateCommitParams,
) -> Result<Value, AppError> {
    tracing::info!(
        branch = %params.branch,
        actions = params.actions.len(),
        "Creating commit"
    );
    client
        .create_commit(
            &params.project_id,
            &params.branch,
            &params.commit_message,
            &params.actions,
        )
        .await
}

// ============================================================================
// Tool Set
// ============================================================================

pub fn tools() -> ToolSet {
    ToolSet::new(
        "commits",
        vec![
            ToolEntry::new(
                "list_commits",
                "List commits in a GitLab project, optionally for one branch",
                list_commits,
            ),
            ToolEntry::new(
                "create_commit",
                "Create a commit with multiple file actions (create, update, delete, move, chmod)",
                create_commit,
            ),
        ],
    )
}
