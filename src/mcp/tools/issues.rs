//! Issue tools.

use std::sync::Arc;

use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::Value;

use super::{default_state, state_or_default};
use crate::error::AppError;
use crate::gitlab::GitLabClient;
use crate::mcp::registry::{ToolEntry, ToolSet};

// ============================================================================
// Parameter Types
// ============================================================================

/// Parameters for list_issues tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListIssuesParams {
    /// Project ID or path.
    pub project_id: String,
    /// State filter (opened, closed, all).
    #[serde(default = "default_state", deserialize_with = "state_or_default")]
    pub state: String,
}

/// Parameters for create_issue tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateIssueParams {
    /// Project ID or path.
    pub project_id: String,
    /// Issue title.
    pub title: String,
    /// Issue description (optional).
    #[serde(default)]
    pub description: Option<String>,
    /// Label names (optional).
    #[serde(default)]
    pub labels: Option<Vec<String>>,
}

// ============================================================================
// Handlers
// ============================================================================

async fn list_issues(
    client: Arc<GitLabClient>,
    params: ListIssuesParams,
) -> Result<Value, AppError> {
    client.list_issues(&params.project_id, &params.state).await
}

async fn create_issue(
    client: Arc<GitLabClient>,
    params: CreateIssueParams,
) -> Result<Value, AppError> {
    tracing::info!(title = %params.title, "Creating issue");
    client
        .create_issue(
            &params.project_id,
            &params.title,
            params.description.as_deref(),
            params.labels.as_deref(),
        )
        .await
}

// ============================================================================
// Tool Set
// ============================================================================

pub fn tools() -> ToolSet {
    ToolSet::new(
        "issues",
        vec![
            ToolEntry::new(
                "list_issues",
                "List issues in a GitLab project",
                list_issues,
            ),
            ToolEntry::new(
                "create_issue",
                "Create a new issue in a GitLab project",
                create_issue,
            ),
        ],
    )
}
