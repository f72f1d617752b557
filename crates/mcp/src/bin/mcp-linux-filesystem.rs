// MCP server for local directory listings

use anyhow::Result;
use clap::Parser;
use toolbridge_mcp::server::McpServer;
use toolbridge_mcp::tools::{register_filesystem_tools, ToolRegistry};

#[derive(Debug, Parser)]
#[command(
    name = "mcp-linux-filesystem",
    version,
    about = "MCP server listing local directories in ls -al form"
)]
struct Args {}

#[tokio::main]
async fn main() -> Result<()> {
    toolbridge_mcp::init_tracing();
    Args::parse();

    tracing::info!("Filesystem MCP server starting...");

    let mut registry = ToolRegistry::new();
    register_filesystem_tools(&mut registry);

    let server = McpServer::new("mcp-linux-filesystem", env!("CARGO_PKG_VERSION"), registry);
    server.start().await?;

    Ok(())
}
