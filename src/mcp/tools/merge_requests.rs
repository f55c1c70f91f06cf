//! Merge request lifecycle tools.

use std::sync::Arc;

use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::Value;

use super::{branch_or_default, default_branch, default_state, state_or_default};
use crate::error::AppError;
use crate::gitlab::models::{MergeRequestUpdate, StateEvent};
use crate::gitlab::GitLabClient;
use crate::mcp::registry::{ToolEntry, ToolSet};

// ============================================================================
// Parameter Types
// ============================================================================

/// Parameters for create_merge_request tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMergeRequestParams {
    /// Project ID or path.
    pub project_id: String,
    /// Source branch name.
    pub source_branch: String,
    /// Target branch name (default: main).
    #[serde(default = "default_branch", deserialize_with = "branch_or_default")]
    pub target_branch: String,
    /// Merge request title.
    pub title: String,
    /// Merge request description (optional).
    #[serde(default)]
    pub description: Option<String>,
}

/// Parameters for list_merge_requests tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListMergeRequestsParams {
    /// Project ID or path.
    pub project_id: String,
    /// State filter (opened, closed, merged, all).
    #[serde(default = "default_state", deserialize_with = "state_or_default")]
    pub state: String,
}

/// Parameters for merge_merge_request tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MergeMergeRequestParams {
    /// Project ID or path.
    pub project_id: String,
    /// Merge request IID.
    pub merge_request_iid: u64,
    /// Custom merge commit message (optional).
    #[serde(default)]
    pub merge_commit_message: Option<String>,
}

/// Parameters for get_merge_request tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetMergeRequestParams {
    /// Project ID or path.
    pub project_id: String,
    /// Merge request IID.
    pub merge_request_iid: u64,
}

/// Parameters for update_merge_request tool.
///
/// Only the fields that are provided are changed.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMergeRequestParams {
    /// Project ID or path.
    pub project_id: String,
    /// Merge request IID.
    pub merge_request_iid: u64,
    /// New title.
    #[serde(default)]
    pub title: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
    /// New target branch.
    #[serde(default)]
    pub target_branch: Option<String>,
    /// Close or reopen the merge request.
    #[serde(default)]
    pub state_event: Option<StateEvent>,
    /// Labels to set, replacing the current ones.
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    /// Remove the source branch when the merge request is merged.
    #[serde(default)]
    pub remove_source_branch: Option<bool>,
}

impl From<UpdateMergeRequestParams> for MergeRequestUpdate {
    fn from(params: UpdateMergeRequestParams) -> Self {
        Self {
            title: params.title,
            description: params.description,
            target_branch: params.target_branch,
            state_event: params.state_event,
            labels: params.labels.map(|labels| labels.join(",")),
            remove_source_branch: params.remove_source_branch,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

async fn create_merge_request(
    client: Arc<GitLabClient>,
    params: CreateMergeRequestParams,
) -> Result<Value, AppError> {
    tracing::info!(
        source = %params.source_branch,
        target = %params.target_branch,
        "Creating merge request"
    );
    client
        .create_merge_request(
            &params.project_id,
            &params.source_branch,
            &params.target_branch,
            &params.title,
            params.description.as_deref(),
        )
        .await
}

async fn list_merge_requests(
    client: Arc<GitLabClient>,
    params: ListMergeRequestsParams,
) -> Result<Value, AppError> {
    client
        .list_merge_requests(&params.project_id, &params.state)
        .await
}

async fn merge_merge_request(
    client: Arc<GitLabClient>,
    params: MergeMergeRequestParams,
) -> Result<Value, AppError> {
    tracing::info!(iid = params.merge_request_iid, "Merging merge request");
    client
        .merge_merge_request(
            &params.project_id,
            params.merge_request_iid,
            params.merge_commit_message.as_deref(),
        )
        .await
}

async fn get_merge_request(
    client: Arc<GitLabClient>,
    params: GetMergeRequestParams,
) -> Result<Value, AppError> {
    client
        .get_merge_request(&params.project_id, params.merge_request_iid)
        .await
}

async fn update_merge_request(
    client: Arc<GitLabClient>,
    params: UpdateMergeRequestParams,
) -> Result<Value, AppError> {
    let project_id = params.project_id.clone();
    let iid = params.merge_request_iid;
    let updates = MergeRequestUpdate::from(params);

    if updates.is_empty() {
        return Err(AppError::InvalidParams {
            tool: "update_merge_request".to_string(),
            message: "at least one field to update is required".to_string(),
        });
    }

    client.update_merge_request(&project_id, iid, &updates).await
}

// ============================================================================
// Tool Set
// ============================================================================

pub fn tools() -> ToolSet {
    ToolSet::new(
        "merge-requests",
        vec![
            ToolEntry::new(
                "create_merge_request",
                "Create a new merge request (PR) in GitLab",
                create_merge_request,
            ),
            ToolEntry::new(
                "list_merge_requests",
                "List merge requests in a GitLab project",
                list_merge_requests,
            ),
            ToolEntry::new(
                "merge_merge_request",
                "Merge a merge request",
                merge_merge_request,
            ),
            ToolEntry::new(
                "get_merge_request",
                "Get details of a specific merge request",
                get_merge_request,
            ),
            ToolEntry::new(
                "update_merge_request",
                "Update the title, description, target branch, labels or state of a merge request",
                update_merge_request,
            ),
        ],
    )
}
