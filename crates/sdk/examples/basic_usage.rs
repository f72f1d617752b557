//! Basic SDK usage example.
//!
//! Connects to a management server, prints the cluster summary and the
//! state of every installed service, then lists running operations.
//!
//! Run with: cargo run --example basic_usage

use std::time::Duration;
use toolbridge_sdk::{AmbariClient, AmbariResult, StateClass};

#[tokio::main]
async fn main() -> AmbariResult<()> {
    tracing_subscriber::fmt::init();

    let client = AmbariClient::builder()
        .host("localhost")
        .port(8080)
        .credentials("admin", "admin")
        .cluster_name("c1")
        .timeout(Duration::from_secs(30))
        .build()?;
    let cluster = client.cluster_name();

    let info = client.clusters().info(cluster).await?;
    println!(
        "Cluster {} ({})",
        info.clusters.cluster_name.as_deref().unwrap_or(cluster),
        info.clusters.version.as_deref().unwrap_or("unknown version")
    );

    let services = client.services().list(cluster, true).await?;
    for service in services.items.unwrap_or_default() {
        let info = service.service_info;
        let state = info.state.as_deref().unwrap_or("UNKNOWN");
        println!(
            "  {} {} [{}]",
            StateClass::of(state).glyph(),
            info.service_name.as_deref().unwrap_or("?"),
            state
        );
    }

    let active = client.requests().active(cluster).await?;
    if active.used_fallback() {
        println!("(server rejected the status filter; filtered locally)");
    }
    println!("\n{} active requests", active.value.len());
    for request in active.value.iter().take(5) {
        let info = &request.requests;
        println!(
            "  #{} {} {}%",
            info.id.unwrap_or_default(),
            info.request_status.as_deref().unwrap_or("?"),
            info.progress_percent.unwrap_or_default()
        );
    }

    Ok(())
}
