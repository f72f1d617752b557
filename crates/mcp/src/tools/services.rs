// Service tools: status, details, components and configuration

use crate::protocol::{CallToolResult, ToolSchema};
use crate::render;
use crate::tools::{json_schema_object, json_schema_string, Tool};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::sync::Arc;
use toolbridge_sdk::AmbariClient;

/// Config types read for each supported service
const SERVICE_CONFIG_TYPES: &[(&str, &[&str])] = &[
    ("HDFS", &["hdfs-site", "core-site", "hadoop-env"]),
    ("YARN", &["yarn-site", "capacity-scheduler", "yarn-env"]),
    ("HBASE", &["hbase-site", "hbase-env"]),
];

/// Config types known for a service, matched case-insensitively
pub fn config_types_for(service: &str) -> Option<&'static [&'static str]> {
    SERVICE_CONFIG_TYPES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(service))
        .map(|(_, types)| *types)
}

#[derive(Debug, Deserialize)]
struct ServiceArgs {
    service_name: String,
}

fn service_name_schema() -> serde_json::Value {
    json_schema_object(
        serde_json::json!({
            "service_name": json_schema_string("Name of the service (e.g. HDFS, YARN, HBASE)")
        }),
        vec!["service_name"],
    )
}

/// Tool to read one service's state
pub struct ServiceStatusTool {
    client: Arc<AmbariClient>,
}

impl ServiceStatusTool {
    pub fn new(client: Arc<AmbariClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for ServiceStatusTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_service_status".to_string(),
            description: "Get the current state of a specific service (STARTED, INSTALLED, STARTING, ...)".to_string(),
            input_schema: service_name_schema(),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ServiceArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for get_service_status")?;
        let cluster = self.client.cluster_name();

        Ok(match self.client.services().status(cluster, &args.service_name).await {
            Ok(item) => CallToolResult::text(render::service_status(cluster, &args.service_name, &item)),
            Err(e) => CallToolResult::error(format!(
                "Unable to retrieve status for service '{}' in cluster '{}' - {}",
                args.service_name, cluster, e
            )),
        })
    }
}

/// Tool to read one service with its components, in a named cluster
pub struct ServiceDetailsTool {
    client: Arc<AmbariClient>,
}

impl ServiceDetailsTool {
    pub fn new(client: Arc<AmbariClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct ServiceDetailsArgs {
    cluster_name: String,
    service_name: String,
}

#[async_trait::async_trait]
impl Tool for ServiceDetailsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_service_details".to_string(),
            description: "Get detailed information about a service in a given cluster: state, components, configuration availability".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "cluster_name": json_schema_string("Name of the cluster (e.g. PROD-CLUSTER)"),
                    "service_name": json_schema_string("Name of the service (e.g. HDFS, YARN, HBASE)")
                }),
                vec!["cluster_name", "service_name"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ServiceDetailsArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for get_service_details")?;

        Ok(
            match self
                .client
                .services()
                .details(&args.cluster_name, &args.service_name)
                .await
            {
                Ok(item) => CallToolResult::text(render::service_details(
                    &args.cluster_name,
                    &args.service_name,
                    &item,
                )),
                Err(e) => CallToolResult::error(e.to_string()),
            },
        )
    }
}

/// Tool to list a service's components and where they run
pub struct ServiceComponentsTool {
    client: Arc<AmbariClient>,
}

impl ServiceComponentsTool {
    pub fn new(client: Arc<AmbariClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for ServiceComponentsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_service_components".to_string(),
            description: format!(
                "List the components of a service with their state and hosts (first {} hosts per component)",
                render::MAX_LISTED_HOSTS
            ),
            input_schema: service_name_schema(),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ServiceArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for get_service_components")?;
        let cluster = self.client.cluster_name();

        Ok(
            match self.client.services().components(cluster, &args.service_name).await {
                Ok(components) => CallToolResult::text(render::service_components(
                    cluster,
                    &args.service_name,
                    &components,
                )),
                Err(e) => CallToolResult::error(format!(
                    "Unable to retrieve components for service '{}' in cluster '{}' - {}",
                    args.service_name, cluster, e
                )),
            },
        )
    }
}

/// Tool to read the latest configuration of a supported service
pub struct ServiceConfigurationsTool {
    client: Arc<AmbariClient>,
}

impl ServiceConfigurationsTool {
    pub fn new(client: Arc<AmbariClient>) -> Self {
        Self { client }
    }

    async fn config_section(&self, cluster: &str, config_type: &str) -> String {
        let configurations = self.client.configurations();

        let latest = match configurations.latest(cluster, config_type).await {
            Ok(latest) => latest,
            Err(e) => return render::config_section_error(config_type, &e),
        };
        let Some(tag) = latest.tag.as_deref() else {
            return render::config_section_error(config_type, &"latest configuration has no tag");
        };

        match configurations.by_tag(cluster, config_type, tag).await {
            Ok(tagged) => render::config_section(config_type, &latest, &tagged),
            Err(e) => render::config_section_error(config_type, &e),
        }
    }
}

#[async_trait::async_trait]
impl Tool for ServiceConfigurationsTool {
    fn schema(&self) -> ToolSchema {
        let supported: Vec<_> = SERVICE_CONFIG_TYPES.iter().map(|(name, _)| *name).collect();
        ToolSchema {
            name: "get_service_configurations".to_string(),
            description: format!(
                "Get the latest configuration properties of a service. Supported services: {}",
                supported.join(", ")
            ),
            input_schema: service_name_schema(),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ServiceArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for get_service_configurations")?;
        let cluster = self.client.cluster_name();

        let Some(config_types) = config_types_for(&args.service_name) else {
            return Ok(CallToolResult::text(format!(
                "No config types defined for service '{}'.",
                args.service_name
            )));
        };

        let mut sections = vec![render::config_header(cluster, &args.service_name)];
        for config_type in config_types {
            sections.push(self.config_section(cluster, config_type).await);
        }

        Ok(CallToolResult::text(sections.join("\n\n")))
    }
}
