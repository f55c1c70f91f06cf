//! Merge request discussion and note tools.

use std::sync::Arc;

use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::Value;

use super::{default_true, true_unless_false};
use crate::error::AppError;
use crate::gitlab::models::Position;
use crate::gitlab::GitLabClient;
use crate::mcp::registry::{ToolEntry, ToolSet};

// ============================================================================
// Parameter Types
// ============================================================================

/// Parameters for list_merge_request_discussions tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListDiscussionsParams {
    /// Project ID or path.
    pub project_id: String,
    /// Merge request IID.
    pub merge_request_iid: u64,
}

/// Parameters for get_merge_request_discussion tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetDiscussionParams {
    /// Project ID or path.
    pub project_id: String,
    /// Merge request IID.
    pub merge_request_iid: u64,
    /// Discussion ID.
    pub discussion_id: String,
}

/// Parameters for create_merge_request_discussion tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDiscussionParams {
    /// Project ID or path.
    pub project_id: String,
    /// Merge request IID.
    pub merge_request_iid: u64,
    /// Discussion body/comment text.
    pub body: String,
    /// Position object for line-specific comments (optional).
    #[serde(default)]
    pub position: Option<Position>,
}

/// Parameters for add_note_to_discussion tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddNoteParams {
    /// Project ID or path.
    pub project_id: String,
    /// Merge request IID.
    pub merge_request_iid: u64,
    /// Discussion ID.
    pub discussion_id: String,
    /// Reply note text.
    pub body: String,
}

/// Parameters for update_discussion_note tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteParams {
    /// Project ID or path.
    pub project_id: String,
    /// Merge request IID.
    pub merge_request_iid: u64,
    /// Discussion ID.
    pub discussion_id: String,
    /// Note ID.
    pub note_id: u64,
    /// Updated note text.
    pub body: String,
}

/// Parameters for delete_discussion_note tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteNoteParams {
    /// Project ID or path.
    pub project_id: String,
    /// Merge request IID.
    pub merge_request_iid: u64,
    /// Discussion ID.
    pub discussion_id: String,
    /// Note ID.
    pub note_id: u64,
}

/// Parameters for resolve_discussion tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolveDiscussionParams {
    /// Project ID or path.
    pub project_id: String,
    /// Merge request IID.
    pub merge_request_iid: u64,
    /// Discussion ID.
    pub discussion_id: String,
    /// Whether to resolve (true) or unresolve (false) the discussion.
    #[serde(default = "default_true", deserialize_with = "true_unless_false")]
    pub resolved: bool,
}

// ============================================================================
// Handlers
// ============================================================================

async fn list_discussions(
    client: Arc<GitLabClient>,
    params: ListDiscussionsParams,
) -> Result<Value, AppError> {
    client
        .list_discussions(&params.project_id, params.merge_request_iid)
        .await
}

async fn get_discussion(
    client: Arc<GitLabClient>,
    params: GetDiscussionParams,
) -> Result<Value, AppError> {
    client
        .get_discussion(
            &params.project_id,
            params.merge_request_iid,
            &params.discussion_id,
        )
        .await
}

async fn create_discussion(
    client: Arc<GitLabClient>,
    params: CreateDiscussionParams,
) -> Result<Value, AppError> {
    tracing::info!(
        iid = params.merge_request_iid,
        inline = params.position.is_some(),
        "Creating discussion"
    );
    client
        .create_discussion(
            &params.project_id,
            params.merge_request_iid,
            &params.body,
            params.position.as_ref(),
        )
        .await
}

async fn add_note(client: Arc<GitLabClient>, params: AddNoteParams) -> Result<Value, AppError> {
    client
        .add_note_to_discussion(
            &params.project_id,
            params.merge_request_iid,
            &params.discussion_id,
            &params.body,
        )
        .await
}

async fn update_note(
    client: Arc<GitLabClient>,
    params: UpdateNoteParams,
) -> Result<Value, AppError> {
    client
        .update_discussion_note(
            &params.project_id,
            params.merge_request_iid,
            &params.discussion_id,
            params.note_id,
            &params.body,
        )
        .await
}

async fn delete_note(
    client: Arc<GitLabClient>,
    params: DeleteNoteParams,
) -> Result<Value, AppError> {
    client
        .delete_discussion_note(
            &params.project_id,
            params.merge_request_iid,
            &params.discussion_id,
            params.note_id,
        )
        .await
}

async fn resolve_discussion(
    client: Arc<GitLabClient>,
    params: ResolveDiscussionParams,
) -> Result<Value, AppError> {
    tracing::info!(
        discussion = %params.discussion_id,
        resolved = params.resolved,
        "Resolving discussion"
    );
    client
        .resolve_discussion(
            &params.project_id,
            params.merge_request_iid,
            &params.discussion_id,
            params.resolved,
        )
        .await
}

// ============================================================================
// Tool Set
// ============================================================================

pub fn tools() -> ToolSet {
    ToolSet::new(
        "discussions",
        vec![
            ToolEntry::new(
                "list_merge_request_discussions",
                "List all discussions in a merge request",
                list_discussions,
            ),
            ToolEntry::new(
                "get_merge_request_discussion",
                "Get a specific discussion in a merge request",
                get_discussion,
            ),
            ToolEntry::new(
                "create_merge_request_discussion",
                "Create a new discussion in a merge request",
                create_discussion,
            ),
            ToolEntry::new(
                "add_note_to_discussion",
                "Add a reply note to an existing discussion",
                add_note,
            ),
            ToolEntry::new(
                "update_discussion_note",
                "Update an existing note in a discussion",
                update_note,
            ),
            ToolEntry::new(
                "delete_discussion_note",
                "Delete a note from a discussion",
                delete_note,
            ),
            ToolEntry::new(
                "resolve_discussion",
                "Resolve or unresolve a discussion",
                resolve_discussion,
            ),
        ],
    )
}
