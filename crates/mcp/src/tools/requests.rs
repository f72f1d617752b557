// Operation request tools

use crate::protocol::{CallToolResult, ToolSchema};
use crate::render;
use crate::tools::{json_schema_empty, json_schema_object, json_schema_string, Tool};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::sync::Arc;
use toolbridge_sdk::AmbariClient;

/// Tool to list requests that are still running
pub struct ActiveRequestsTool {
    client: Arc<AmbariClient>,
}

impl ActiveRequestsTool {
    pub fn new(client: Arc<AmbariClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for ActiveRequestsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_active_requests".to_string(),
            description: "List operations in progress (pending, queued, in progress or started) with their progress".to_string(),
            input_schema: json_schema_empty(),
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult> {
        let cluster = self.client.cluster_name();

        Ok(match self.client.requests().active(cluster).await {
            Ok(outcome) => CallToolResult::text(render::active_requests(cluster, &outcome)),
            Err(e) => CallToolResult::error(format!(
                "Unable to retrieve active requests for cluster '{}' - {}",
                cluster, e
            )),
        })
    }
}

/// Tool to read one request's status
pub struct RequestStatusTool {
    client: Arc<AmbariClient>,
}

impl RequestStatusTool {
    pub fn new(client: Arc<AmbariClient>) -> Self {
        Self { client }
    }
}

/// Request ids arrive as strings from most clients, numbers from some
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RequestId {
    Number(u64),
    Text(String),
}

impl RequestId {
    fn parse(&self) -> Option<u64> {
        match self {
            RequestId::Number(id) => Some(*id),
            RequestId::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestId::Number(id) => write!(f, "{}", id),
            RequestId::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RequestStatusArgs {
    request_id: RequestId,
}

#[async_trait::async_trait]
impl Tool for RequestStatusTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_request_status".to_string(),
            description: "Get the status and progress of a request, e.g. one returned by start_service".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "request_id": json_schema_string("Id of the request to check")
                }),
                vec!["request_id"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: RequestStatusArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for get_request_status")?;

        let Some(request_id) = args.request_id.parse() else {
            return Ok(CallToolResult::error(format!(
                "Invalid request id '{}'; expected a number",
                args.request_id
            )));
        };
        let cluster = self.client.cluster_name();

        Ok(match self.client.requests().get(cluster, request_id).await {
            Ok(request) => CallToolResult::text(render::request_status(request_id, &request)),
            Err(e) => CallToolResult::error(format!(
                "Unable to retrieve status of request {} in cluster '{}' - {}",
                request_id, cluster, e
            )),
        })
    }
}
