//! Branch management tools.

use std::sync::Arc;

use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::Value;

use super::{branch_or_default, default_branch};
use crate::error::AppError;
use crate::gitlab::GitLabClient;
use crate::mcp::registry::{ToolEntry, ToolSet};

// ============================================================================
// Parameter Types
// ============================================================================

/// Parameters for list_branches tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListBranchesParams {
    /// Project ID or path.
    pub project_id: String,
}

/// Parameters for create_branch tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBranchParams {
    /// Project ID or path.
    pub project_id: String,
    /// Name of the new branch.
    pub branch_name: String,
    /// Source branch or commit SHA (default: main).
    #[serde(
        rename = "ref",
        default = "default_branch",
        deserialize_with = "branch_or_default"
    )]
    pub git_ref: String,
}

/// Parameters for delete_branch tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteBranchParams {
    /// Project ID or path.
    pub project_id: String,
    /// Name of the branch to delete.
    pub branch_name: String,
}

// ============================================================================
// Handlers
// ============================================================================

async fn list_branches(
    client: Arc<GitLabClient>,
    params: ListBranchesParams,
) -> Result<Value, AppError> {
    client.list_branches(&params.project_id).await
}

async fn create_branch(
    client: Arc<GitLabClient>,
    params: CreateBranchParams,
) -> Result<Value, AppError> {
    tracing::info!(
        branch = %params.branch_name,
        git_ref = %params.git_ref,
        "Creating branch"
    );
    client
        .create_branch(&params.project_id, &params.branch_name, &params.git_ref)
        .await
}

async fn delete_branch(
    client: Arc<GitLabClient>,
    params: DeleteBranchParams,
) -> Result<Value, AppError> {
    client
        .delete_branch(&params.project_id, &params.branch_name)
        .await
}

// ============================================================================
// Tool Set
// ============================================================================

pub fn tools() -> ToolSet {
    ToolSet::new(
        "branches",
        vec![
            ToolEntry::new(
                "list_branches",
                "List all branches in a GitLab project",
                list_branches,
            ),
            ToolEntry::new(
                "create_branch",
                "Create a new branch in a GitLab project",
                create_branch,
            ),
            ToolEntry::new(
                "delete_branch",
                "Delete a branch from a GitLab project",
                delete_branch,
            ),
        ],
    )
}
