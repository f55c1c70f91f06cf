//! CLI module for the GitLab MCP server.
//!
//! Subcommands:
//! - `mcp`: Run the MCP server (stdio transport, the default)
//! - `tools`: Print the tool catalogue as JSON

mod mcp;
mod tools;

use clap::{Parser, Subcommand};

/// GitLab MCP server
#[derive(Parser)]
#[command(name = "gitlab-mcp")]
#[command(about = "GitLab REST API exposed as MCP tools over stdio")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Run the MCP server (stdio transport)
    Mcp,

    /// Print every tool descriptor as JSON and exit
    Tools,
}

impl App {
    /// Run the CLI application.
    pub async fn run(self) -> color_eyre::Result<()> {
        match self.command.unwrap_or(Command::Mcp) {
            Command::Mcp => self.run_mcp().await,
            Command::Tools => self.run_tools(),
        }
    }
}
