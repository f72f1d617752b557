// MCP server for the Ambari cluster management REST API

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use toolbridge_mcp::server::McpServer;
use toolbridge_mcp::tools::{register_cluster_tools, ToolRegistry};
use toolbridge_sdk::config::{
    DEFAULT_CLUSTER, DEFAULT_HOST, DEFAULT_PASSWORD, DEFAULT_PORT, DEFAULT_USER,
};
use toolbridge_sdk::{AmbariClient, ClientConfig};

#[derive(Debug, Parser)]
#[command(name = "mcp-ambari-api", version, about = "MCP server for Ambari cluster operations")]
struct Args {
    /// Management server host
    #[arg(long, env = "AMBARI_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Management server port
    #[arg(long, env = "AMBARI_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Basic auth user
    #[arg(long, env = "AMBARI_USER", default_value = DEFAULT_USER)]
    user: String,

    /// Basic auth password
    #[arg(long, env = "AMBARI_PASS", default_value = DEFAULT_PASSWORD, hide_env_values = true)]
    password: String,

    /// Cluster targeted by tools that do not take a cluster name
    #[arg(long, env = "AMBARI_CLUSTER_NAME", default_value = DEFAULT_CLUSTER)]
    cluster: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "AMBARI_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,
}

impl Args {
    fn client_config(&self) -> Result<ClientConfig> {
        let base_url = ClientConfig::base_url_for(&self.host, self.port)
            .with_context(|| format!("Invalid server address {}:{}", self.host, self.port))?;

        let mut config = ClientConfig::new(base_url);
        config.username = self.user.clone();
        config.password = self.password.clone();
        config.cluster_name = self.cluster.clone();
        config.timeout = self.timeout_secs.map(Duration::from_secs);
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    toolbridge_mcp::init_tracing();

    let args = Args::parse();
    let config = args.client_config()?;

    tracing::info!(
        url = %config.base_url,
        cluster = %config.cluster_name,
        user = %config.username,
        "Ambari MCP server starting..."
    );
    if config.uses_default_credentials() {
        tracing::warn!("Using default admin/admin credentials; set AMBARI_USER and AMBARI_PASS for real clusters");
    }

    let client = Arc::new(
        AmbariClient::from_config(config).context("Failed to create Ambari API client")?,
    );

    let mut registry = ToolRegistry::new();
    register_cluster_tools(&mut registry, client);

    tracing::info!("Registered {} tools", registry.len());

    let server = McpServer::new("mcp-ambari-api", env!("CARGO_PKG_VERSION"), registry);
    server.start().await?;

    Ok(())
}
