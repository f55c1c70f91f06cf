//! HTTP client for the GitLab REST API.
//!
//! Every method issues exactly one request and returns the response body as
//! untouched JSON. Reshaping (e.g. decoding file content) belongs to the tool
//! layer.

use std::iter;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{header, Client, RequestBuilder};
use serde::Serialize;
use serde_json::{json, Value};
use url::Url;

use crate::config::{Config, ConfigError};
use crate::error::AppError;
use crate::gitlab::models::{CommitAction, MergeRequestUpdate, Position};

/// Everything but RFC 3986 unreserved characters is escaped, so `/`, `%`,
/// whitespace and control characters all survive as part of one segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Stateless wrapper around a configured `reqwest::Client`.
///
/// Cheap to clone; safe to share across concurrent tool invocations.
#[derive(Debug, Clone)]
pub struct GitLabClient {
    http: Client,
    base_url: Url,
}

impl GitLabClient {
    /// Create a client from the loaded configuration.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let base_url = Url::parse(&config.url)?;
        if base_url.cannot_be_a_base() {
            return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase.into());
        }

        let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|_| {
                ConfigError::from(figment::Error::from(
                    "token contains characters not allowed in an HTTP header".to_string(),
                ))
            })?;
        auth.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);

        let mut builder = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("gitlab-mcp/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url,
        })
    }

    /// API root this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ========================================================================
    // URL building
    // ========================================================================

    /// Append path segments to the base URL, percent-encoding each one.
    ///
    /// Each segment stays a single segment: `/` inside a segment becomes `%2F`.
    /// `.` and `..` are rejected; URL normalization would resolve them away.
    fn endpoint<I>(&self, segments: I) -> Result<Url, AppError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut path = self.base_url.path().trim_end_matches('/').to_string();
        for segment in segments {
            let segment = segment.as_ref();
            if segment == "." || segment == ".." {
                return Err(AppError::UnaddressablePath(segment.to_string()));
            }
            path.push('/');
            path.extend(utf8_percent_encode(segment, SEGMENT));
        }

        let mut url = self.base_url.clone();
        url.set_path(&path);
        Ok(url)
    }

    /// `/projects/:id/<rest...>`
    fn project_endpoint(&self, project_id: &str, rest: &[&str]) -> Result<Url, AppError> {
        self.endpoint(
            iter::once("projects")
                .chain(iter::once(project_id))
                .chain(rest.iter().copied()),
        )
    }

    /// `/projects/:id/merge_requests/:iid/<rest...>`
    fn merge_request_endpoint(
        &self,
        project_id: &str,
        merge_request_iid: u64,
        rest: &[&str],
    ) -> Result<Url, AppError> {
        let iid = merge_request_iid.to_string();
        let mut segments = vec!["merge_requests", iid.as_str()];
        segments.extend_from_slice(rest);
        self.project_endpoint(project_id, &segments)
    }

    // ========================================================================
    // Request execution
    // ========================================================================

    async fn send(&self, request: RequestBuilder) -> Result<Value, AppError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "GitLab request failed");
            return Err(AppError::from_response(status.as_u16(), &body));
        }

        // DELETE endpoints answer 204 with no body.
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&body)?)
    }

    async fn get(&self, url: Url) -> Result<Value, AppError> {
        tracing::debug!(url = %url, "GET request");
        self.send(self.http.get(url)).await
    }

    async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        url: Url,
        query: &Q,
    ) -> Result<Value, AppError> {
        tracing::debug!(url = %url, "GET request with query");
        self.send(self.http.get(url).query(query)).await
    }

    async fn post<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> Result<Value, AppError> {
        tracing::debug!(url = %url, "POST request");
        self.send(self.http.post(url).json(body)).await
    }

    async fn put<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> Result<Value, AppError> {
        tracing::debug!(url = %url, "PUT request");
        self.send(self.http.put(url).json(body)).await
    }

    async fn delete(&self, url: Url) -> Result<Value, AppError> {
        tracing::debug!(url = %url, "DELETE request");
        self.send(self.http.delete(url)).await
    }

    async fn delete_with_body<B: Serialize + ?Sized>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<Value, AppError> {
        tracing::debug!(url = %url, "DELETE request with body");
        self.send(self.http.delete(url).json(body)).await
    }

    // ========================================================================
    // Projects
    // ========================================================================

    /// Get a single project by numeric ID or full path.
    pub async fn get_project(&self, project_id: &str) -> Result<Value, AppError> {
        self.get(self.project_endpoint(project_id, &[])?).await
    }

    /// List projects the token's user is a member of, simplified representation.
    pub async fn list_projects(&self) -> Result<Value, AppError> {
        let url = self.endpoint(["projects"])?;
        self.get_with_query(url, &[("membership", "true"), ("simple", "true")])
            .await
    }

    // ========================================================================
    // Branches
    // ========================================================================

    pub async fn list_branches(&self, project_id: &str) -> Result<Value, AppError> {
        self.get(self.project_endpoint(project_id, &["repository", "branches"])?)
            .await
    }

    pub async fn create_branch(
        &self,
        project_id: &str,
        branch_name: &str,
        git_ref: &str,
    ) -> Result<Value, AppError> {
        let url = self.project_endpoint(project_id, &["repository", "branches"])?;
        self.post(url, &json!({ "branch": branch_name, "ref": git_ref }))
            .await
    }

    pub async fn delete_branch(
        &self,
        project_id: &str,
        branch_name: &str,
    ) -> Result<Value, AppError> {
        let url = self.project_endpoint(project_id, &["repository", "branches", branch_name])?;
        self.delete(url).await
    }

    // ========================================================================
    // Files
    // ========================================================================

    /// Fetch file metadata and content. `content` is still base64 here.
    pub async fn get_file(
        &self,
        project_id: &str,
        file_path: &str,
        git_ref: &str,
    ) -> Result<Value, AppError> {
        let url = self.project_endpoint(project_id, &["repository", "files", file_path])?;
        self.get_with_query(url, &[("ref", git_ref)]).await
    }

    pub async fn create_file(
        &self,
        project_id: &str,
        file_path: &str,
        content: &str,
        commit_message: &str,
        branch: &str,
    ) -> Result<Value, AppError> {
        let url = self.project_endpoint(project_id, &["repository", "files", file_path])?;
        self.post(url, &file_payload(content, commit_message, branch))
            .await
    }

    pub async fn update_file(
        &self,
        project_id: &str,
        file_path: &str,
        content: &str,
        commit_message: &str,
        branch: &str,
    ) -> Result<Value, AppError> {
        let url = self.project_endpoint(project_id, &["repository", "files", file_path])?;
        self.put(url, &file_payload(content, commit_message, branch))
            .await
    }

    pub async fn delete_file(
        &self,
        project_id: &str,
        file_path: &str,
        commit_message: &str,
        branch: &str,
    ) -> Result<Value, AppError> {
        let url = self.project_endpoint(project_id, &["repository", "files", file_path])?;
        self.delete_with_body(
            url,
            &json!({ "branch": branch, "commit_message": commit_message }),
        )
        .await
    }

    // ========================================================================
    // Commits
    // ========================================================================

    /// List commits, optionally restricted to one branch.
    pub async fn get_commits(
        &self,
        project_id: &str,
        branch: Option<&str>,
    ) -> Result<Value, AppError> {
        let url = self.project_endpoint(project_id, &["repository", "commits"])?;
        match branch {
            Some(branch) => self.get_with_query(url, &[("ref_name", branch)]).await,
            None => self.get(url).await,
        }
    }

    pub async fn create_commit(
        &self,
        project_id: &str,
        branch: &str,
        commit_message: &str,
        actions: &[CommitAction],
    ) -> Result<Value, AppError> {
        let url = self.project_endpoint(project_id, &["repository", "commits"])?;
        self.post(
            url,
            &json!({
                "branch": branch,
                "commit_message": commit_message,
                "actions": actions,
            }),
        )
        .await
    }

    // ========================================================================
    // Merge requests
    // ========================================================================

    pub async fn list_merge_requests(
        &self,
        project_id: &str,
        state: &str,
    ) -> Result<Value, AppError> {
        let url = self.project_endpoint(project_id, &["merge_requests"])?;
        self.get_with_query(url, &[("state", state)]).await
    }

    pub async fn create_merge_request(
        &self,
        project_id: &str,
        source_branch: &str,
        target_branch: &str,
        title: &str,
        description: Option<&str>,
    ) -> Result<Value, AppError> {
        let url = self.project_endpoint(project_id, &["merge_requests"])?;
        self.post(
            url,
            &json!({
                "source_branch": source_branch,
                "target_branch": target_branch,
                "title": title,
                "description": description.unwrap_or_default(),
            }),
        )
        .await
    }

    pub async fn get_merge_request(
        &self,
        project_id: &str,
        merge_request_iid: u64,
    ) -> Result<Value, AppError> {
        self.get(self.merge_request_endpoint(project_id, merge_request_iid, &[])?)
            .await
    }

    pub async fn update_merge_request(
        &self,
        project_id: &str,
        merge_request_iid: u64,
        updates: &MergeRequestUpdate,
    ) -> Result<Value, AppError> {
        let url = self.merge_request_endpoint(project_id, merge_request_iid, &[])?;
        self.put(url, updates).await
    }

    pub async fn merge_merge_request(
        &self,
        project_id: &str,
        merge_request_iid: u64,
        merge_commit_message: Option<&str>,
    ) -> Result<Value, AppError> {
        let url = self.merge_request_endpoint(project_id, merge_request_iid, &["merge"])?;
        let mut payload = serde_json::Map::new();
        if let Some(message) = merge_commit_message {
            payload.insert("merge_commit_message".to_string(), json!(message));
        }
        self.put(url, &payload).await
    }

    // ========================================================================
    // Issues
    // ========================================================================

    pub async fn list_issues(&self, project_id: &str, state: &str) -> Result<Value, AppError> {
        let url = self.project_endpoint(project_id, &["issues"])?;
        self.get_with_query(url, &[("state", state)]).await
    }

    pub async fn create_issue(
        &self,
        project_id: &str,
        title: &str,
        description: Option<&str>,
        labels: Option<&[String]>,
    ) -> Result<Value, AppError> {
        let url = self.project_endpoint(project_id, &["issues"])?;
        self.post(
            url,
            &json!({
                "title": title,
                "description": description.unwrap_or_default(),
                "labels": labels.unwrap_or_default(),
            }),
        )
        .await
    }

    // ========================================================================
    // Discussions
    // ========================================================================

    pub async fn list_discussions(
        &self,
        project_id: &str,
        merge_request_iid: u64,
    ) -> Result<Value, AppError> {
        self.get(self.merge_request_endpoint(project_id, merge_request_iid, &["discussions"])?)
            .await
    }

    pub async fn get_discussion(
        &self,
        project_id: &str,
        merge_request_iid: u64,
        discussion_id: &str,
    ) -> Result<Value, AppError> {
        let url = self.merge_request_endpoint(
            project_id,
            merge_request_iid,
            &["discussions", discussion_id],
        )?;
        self.get(url).await
    }

    /// Start a discussion; `position` anchors it to a diff line when given.
    pub async fn create_discussion(
        &self,
        project_id: &str,
        merge_request_iid: u64,
        body: &str,
        position: Option<&Position>,
    ) -> Result<Value, AppError> {
        let url = self.merge_request_endpoint(project_id, merge_request_iid, &["discussions"])?;
        let mut payload = json!({ "body": body });
        if let Some(position) = position {
            payload["position"] = serde_json::to_value(position)?;
        }
        self.post(url, &payload).await
    }

    pub async fn add_note_to_discussion(
        &self,
        project_id: &str,
        merge_request_iid: u64,
        discussion_id: &str,
        body: &str,
    ) -> Result<Value, AppError> {
        let url = self.merge_request_endpoint(
            project_id,
            merge_request_iid,
            &["discussions", discussion_id, "notes"],
        )?;
        self.post(url, &json!({ "body": body })).await
    }

    pub async fn update_discussion_note(
        &self,
        project_id: &str,
        merge_request_iid: u64,
        discussion_id: &str,
        note_id: u64,
        body: &str,
    ) -> Result<Value, AppError> {
        let note = note_id.to_string();
        let url = self.merge_request_endpoint(
            project_id,
            merge_request_iid,
            &["discussions", discussion_id, "notes", &note],
        )?;
        self.put(url, &json!({ "body": body })).await
    }

    pub async fn delete_discussion_note(
        &self,
        project_id: &str,
        merge_request_iid: u64,
        discussion_id: &str,
        note_id: u64,
    ) -> Result<Value, AppError> {
        let note = note_id.to_string();
        let url = self.merge_request_endpoint(
            project_id,
            merge_request_iid,
            &["discussions", discussion_id, "notes", &note],
        )?;
        self.delete(url).await
    }

    pub async fn resolve_discussion(
        &self,
        project_id: &str,
        merge_request_iid: u64,
        discussion_id: &str,
        resolved: bool,
    ) -> Result<Value, AppError> {
        let url = self.merge_request_endpoint(
            project_id,
            merge_request_iid,
            &["discussions", discussion_id],
        )?;
        self.put(url, &json!({ "resolved": resolved })).await
    }
}

/// Create/update file body; content travels base64-encoded.
fn file_payload(content: &str, commit_message: &str, branch: &str) -> Value {
    json!({
        "branch": branch,
        "content": BASE64.encode(content),
        "encoding": "base64",
        "commit_message": commit_message,
    })
}
