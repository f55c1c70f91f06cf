//! Application context shared by every tool invocation.

use std::sync::Arc;

use crate::config::Config;
use crate::error::AppError;
use crate::gitlab::GitLabClient;

/// Root application context.
///
/// Built once at startup and shared read-only by reference; nothing in it
/// changes while the server runs.
#[derive(Clone)]
pub struct Context {
    /// GitLab API client.
    pub client: Arc<GitLabClient>,
    /// Application configuration.
    pub config: Arc<Config>,
}

impl Context {
    /// Creates a new context with the given dependencies.
    pub fn new(client: GitLabClient, config: Config) -> Self {
        Self {
            client: Arc::new(client),
            config: Arc::new(config),
        }
    }

    /// Build the client from configuration and wrap both.
    pub fn from_config(config: Config) -> Result<Self, AppError> {
        let client = GitLabClient::new(&config)?;
        tracing::info!(url = %client.base_url(), "Configured GitLab client");

        if let Some(project) = &config.default_project_id {
            tracing::warn!(
                default_project_id = %project,
                "DEFAULT_PROJECT_ID is set but not used; tools require an explicit projectId"
            );
        }

        Ok(Self::new(client, config))
    }
}
