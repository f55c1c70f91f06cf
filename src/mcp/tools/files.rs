//! Repository file tools.
//!
//! `get_file` is the one tool that reshapes its result: GitLab returns file
//! content base64-encoded, the tool hands it back as plain text alongside the
//! rest of the file metadata.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
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

/// Parameters for create_file and update_file tools.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WriteFileParams {
    /// Project ID or path.
    pub project_id: String,
    /// Path to the file in the repository.
    pub file_path: String,
    /// File content.
    pub content: String,
    /// Commit message.
    pub commit_message: String,
    /// Target branch (default: main).
    #[serde(default = "default_branch", deserialize_with = "branch_or_default")]
    pub branch: String,
}

/// Parameters for get_file tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetFileParams {
    /// Project ID or path.
    pub project_id: String,
    /// Path to the file in the repository.
    pub file_path: String,
    /// Branch or commit SHA (default: main).
    #[serde(
        rename = "ref",
        default = "default_branch",
        deserialize_with = "branch_or_default"
    )]
    pub git_ref: String,
}

/// Parameters for delete_file tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFileParams {
    /// Project ID or path.
    pub project_id: String,
    /// Path to the file in the repository.
    pub file_path: String,
    /// Commit message.
    pub commit_message: String,
    /// Target branch (default: main).
    #[serde(default = "default_branch", deserialize_with = "branch_or_default")]
    pub branch: String,
}

// ============================================================================
// Handlers
// ============================================================================

async fn create_file(
    client: Arc<GitLabClient>,
    params: WriteFileParams,
) -> Result<Value, AppError> {
    tracing::info!(path = %params.file_path, branch = %params.branch, "Creating file");
    client
        .create_file(
            &params.project_id,
            &params.file_path,
            &params.content,
            &params.commit_message,
            &params.branch,
        )
        .await
}

async fn update_file(
    client: Arc<GitLabClient>,
    params: WriteFileParams,
) -> Result<Value, AppError> {
    tracing::info!(path = %params.file_path, branch = %params.branch, "Updating file");
    client
        .update_file(
            &params.project_id,
            &params.file_path,
            &params.content,
            &params.commit_message,
            &params.branch,
        )
        .await
}

async fn get_file(client: Arc<GitLabClient>, params: GetFileParams) -> Result<Value, AppError> {
    let file = client
        .get_file(&params.project_id, &params.file_path, &params.git_ref)
        .await?;
    decode_file_content(file)
}

async fn delete_file(
    client: Arc<GitLabClient>,
    params: DeleteFileParams,
) -> Result<Value, AppError> {
    tracing::info!(path = %params.file_path, branch = %params.branch, "Deleting file");
    client
        .delete_file(
            &params.project_id,
            &params.file_path,
            &params.commit_message,
            &params.branch,
        )
        .await
}

/// Replace the base64 `content` field with its UTF-8 text.
///
/// Invalid UTF-8 is replaced lossily. Responses without a string `content`
/// field pass through unchanged.
pub fn decode_file_content(mut file: Value) -> Result<Value, AppError> {
    if let Some(content) = file.get_mut("content") {
        if let Some(encoded) = content.as_str() {
            // GitLab may wrap long base64 payloads.
            let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
            let bytes = BASE64.decode(compact)?;
            *content = Value::String(String::from_utf8_lossy(&bytes).into_owned());
        }
    }
    Ok(file)
}

// ============================================================================
// Tool Set
// ============================================================================

pub fn tools() -> ToolSet {
    ToolSet::new(
        "files",
        vec![
            ToolEntry::new(
                "create_file",
                "Create a new file in a GitLab repository",
                create_file,
            ),
            ToolEntry::new(
                "update_file",
                "Update an existing file in a GitLab repository",
                update_file,
            ),
            ToolEntry::new(
                "get_file",
                "Get file content from a GitLab repository",
                get_file,
            ),
            ToolEntry::new(
                "delete_file",
                "Delete a file from a GitLab repository",
                delete_file,
            ),
        ],
    )
}
