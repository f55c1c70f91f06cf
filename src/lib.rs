//! GitLab MCP Server
//!
//! Exposes the GitLab REST API as Model Context Protocol tools over stdio.

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod gitlab;
pub mod mcp;
