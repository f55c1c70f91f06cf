//! MCP server implementation for GitLab.

use std::sync::Arc;

use rmcp::{
    handler::server::ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Implementation, JsonObject, ListToolsResult,
        PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
    ErrorData as McpError, RoleServer,
};

use crate::context::Context;
use crate::error::AppError;
use crate::mcp::protocol;
use crate::mcp::registry::ToolRegistry;
use crate::mcp::tools;

/// GitLab MCP Server.
///
/// This server provides AI assistants with tools to:
/// - Look up projects and browse branches, commits and files
/// - Create, update and delete files and branches
/// - Open, update and merge merge requests
/// - Review merge requests through discussions and notes
/// - List and open issues
#[derive(Clone)]
pub struct McpServer {
    pub(crate) ctx: Arc<Context>,
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    /// Create a new server with the given context.
    ///
    /// Fails if two domains register the same tool name.
    pub fn new(ctx: Context) -> Result<Self, AppError> {
        tracing::info!("Initializing GitLab MCP server");

        let registry = Self::tool_registry()?;
        tracing::info!(tools = registry.len(), "Registered tools");

        Ok(Self {
            ctx: Arc::new(ctx),
            registry: Arc::new(registry),
        })
    }

    /// Build the combined registry from all tool modules.
    pub fn tool_registry() -> Result<ToolRegistry, AppError> {
        ToolRegistry::build(tools::all())
    }

    /// Every tool descriptor, in registry order.
    pub fn tools(&self) -> Vec<Tool> {
        self.registry.descriptors()
    }

    /// Run one invocation and wrap the outcome in a content envelope.
    ///
    /// Never fails: routing, argument and backend errors all come back as an
    /// error-flagged result.
    pub async fn invoke(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        let domain = self.registry.domain_of(name).unwrap_or("none");
        tracing::info!(tool = %name, domain, "Running tool");

        match self
            .registry
            .dispatch(self.ctx.client.clone(), name, arguments)
            .await
        {
            Ok(value) => protocol::success(&value),
            Err(err) => {
                tracing::warn!(tool = %name, error = %err, "Tool call failed");
                protocol::failure(&err)
            }
        }
    }
}

// ============================================================================
// Server Handler
// ============================================================================

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                r#"GitLab MCP Server

Exposes the GitLab REST API as tools. Every tool takes an explicit
`projectId`: a numeric ID ("123") or a full path ("group/sub-group/project").

## Repository Tools

- **list_projects** - Projects you are a member of
- **get_project** - Project details

## Branch Tools

- **list_branches** / **create_branch** (ref defaults to main) / **delete_branch**

## Merge Request Tools

- **create_merge_request** (target defaults to main)
- **list_merge_requests** (state defaults to opened)
- **get_merge_request** / **update_merge_request** / **merge_merge_request**

## File Tools

- **get_file** - Returns decoded text content
- **create_file** / **update_file** / **delete_file** (branch defaults to main)

## Discussion Tools

- **list_merge_request_discussions** / **get_merge_request_discussion**
- **create_merge_request_discussion** - Pass `position` for an inline comment
- **add_note_to_discussion** / **update_discussion_note** / **delete_discussion_note**
- **resolve_discussion** (resolved defaults to true)

## Commit Tools

- **list_commits** / **create_commit** - Multi-file commit from actions

## Issue Tools

- **list_issues** / **create_issue**
"#
                .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.invoke(&request.name, request.arguments).await)
    }
}
