// MCP (Model Context Protocol) servers exposing cluster management and
// local filesystem tools to LLM clients over stdio

pub mod protocol;
pub mod render;
pub mod server;
pub mod tools;

pub use server::McpServer;

/// Install the tracing subscriber on stderr; stdout carries the protocol.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
