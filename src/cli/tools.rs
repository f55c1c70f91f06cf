//! Tool catalogue command handler.

use color_eyre::Result;

use crate::mcp::McpServer;

use super::App;

impl App {
    /// Print the descriptors `tools/list` would return.
    ///
    /// Needs no token: the catalogue is static.
    pub fn run_tools(&self) -> Result<()> {
        let registry = McpServer::tool_registry()?;
        let catalogue = serde_json::to_string_pretty(&registry.descriptors())?;
        println!("{}", catalogue);
        Ok(())
    }
}
