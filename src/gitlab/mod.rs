//! GitLab REST API backend.
//!
//! - `client`: one method per remote operation, one HTTP call each
//! - `models`: typed payloads passed through to the API

pub mod client;
pub mod models;

pub use client::GitLabClient;
