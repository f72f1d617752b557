//! # Toolbridge SDK
//!
//! Async client for the Ambari cluster management REST API (`/api/v1`).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use toolbridge_sdk::{AmbariClient, AmbariResult};
//!
//! #[tokio::main]
//! async fn main() -> AmbariResult<()> {
//!     let client = AmbariClient::builder()
//!         .host("ambari.example.com")
//!         .port(8080)
//!         .credentials("admin", "admin")
//!         .cluster_name("c1")
//!         .build()?;
//!
//!     let services = client.services().list(client.cluster_name(), true).await?;
//!     for item in services.items.unwrap_or_default() {
//!         println!("{:?}", item.service_info.service_name);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod transport;

// Re-export main client
pub use client::{AmbariClient, AmbariClientBuilder};
pub use config::ClientConfig;
pub use error::{AmbariError, AmbariResult};

// Re-export core types for convenience
pub use toolbridge_core::{DesiredState, RequestStatus, ServiceState, StateClass};
