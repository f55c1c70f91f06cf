//! Model Context Protocol (MCP) server implementation for GitLab.
//!
//! This module provides an MCP server that lets AI assistants drive the
//! GitLab REST API through named tools.
//!
//! ## Architecture
//!
//! Each tool domain contributes a set of entries (descriptor + handler). The
//! registry merges them into one flat name lookup at startup. The server
//! parses raw arguments into the tool's typed parameters, calls the GitLab
//! client, and wraps the result or error into a content envelope.
//!
//! ## Modules
//!
//! - `server`: MCP `ServerHandler` implementation
//! - `registry`: flat tool registry with typed argument parsing
//! - `protocol`: response envelope helpers
//! - `tools`: tool implementations organized by domain

pub mod protocol;
pub mod registry;
pub(crate) mod server;
pub mod tools;

pub use server::McpServer;
