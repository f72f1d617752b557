// Cluster-level tools: summary and service list

use crate::protocol::{CallToolResult, ToolSchema};
use crate::render;
use crate::tools::{json_schema_boolean, json_schema_empty, json_schema_object, Tool};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::sync::Arc;
use toolbridge_sdk::AmbariClient;

/// Tool to read the cluster summary
pub struct ClusterInfoTool {
    client: Arc<AmbariClient>,
}

impl ClusterInfoTool {
    pub fn new(client: Arc<AmbariClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for ClusterInfoTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_cluster_info".to_string(),
            description: "Get basic information about the cluster: name, stack version, provisioning state and security type".to_string(),
            input_schema: json_schema_empty(),
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult> {
        let cluster = self.client.cluster_name();

        Ok(match self.client.clusters().info(cluster).await {
            Ok(response) => CallToolResult::text(render::cluster_info(cluster, &response)),
            Err(e) => CallToolResult::error(format!(
                "Unable to retrieve information for cluster '{}' - {}",
                cluster, e
            )),
        })
    }
}

/// Tool to list the services of the cluster
pub struct ClusterServicesTool {
    client: Arc<AmbariClient>,
}

impl ClusterServicesTool {
    pub fn new(client: Arc<AmbariClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct ClusterServicesArgs {
    #[serde(default)]
    include_state: Option<bool>,
}

#[async_trait::async_trait]
impl Tool for ClusterServicesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_cluster_services".to_string(),
            description: "List all services installed in the cluster with their current state".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "include_state": json_schema_boolean("Include each service's state and a status indicator (default: true)")
                }),
                vec![],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ClusterServicesArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for get_cluster_services")?;
        let with_state = args.include_state.unwrap_or(true);
        let cluster = self.client.cluster_name();

        Ok(match self.client.services().list(cluster, with_state).await {
            Ok(list) => CallToolResult::text(render::service_list(cluster, &list, with_state)),
            Err(e) => CallToolResult::error(format!(
                "Unable to retrieve service list for cluster '{}' - {}",
                cluster, e
            )),
        })
    }
}
