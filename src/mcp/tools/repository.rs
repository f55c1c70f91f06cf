//! Project lookup tools.

use std::sync::Arc;

use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::Value;

use crate::error::AppError;
use crate::gitlab::GitLabClient;
use crate::mcp::registry::{ToolEntry, ToolSet};

// ============================================================================
// Parameter Types
// ============================================================================

/// Parameters for list_projects tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListProjectsParams {}

/// Parameters for get_project tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetProjectParams {
    /// Project ID or path (e.g., "username/project-name" or "123").
    pub project_id: String,
}

// ============================================================================
// Handlers
// ============================================================================

async fn list_projects(
    client: Arc<GitLabClient>,
    _params: ListProjectsParams,
) -> Result<Value, AppError> {
    client.list_projects().await
}

async fn get_project(
    client: Arc<GitLabClient>,
    params: GetProjectParams,
) -> Result<Value, AppError> {
    client.get_project(&params.project_id).await
}

// ============================================================================
// Tool Set
// ============================================================================

pub fn tools() -> ToolSet {
    ToolSet::new(
        "repository",
        vec![
            ToolEntry::new(
                "list_projects",
                "List all GitLab projects the user has access to",
                list_projects,
            ),
            ToolEntry::new(
                "get_project",
                "Get details of a specific GitLab project",
                get_project,
            ),
        ],
    )
}
