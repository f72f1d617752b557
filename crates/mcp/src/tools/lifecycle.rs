// Service lifecycle tools: start and stop, per service or cluster-wide

use crate::protocol::{CallToolResult, ToolSchema};
use crate::render;
use crate::tools::{json_schema_empty, json_schema_object, json_schema_string, Tool};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::sync::Arc;
use toolbridge_sdk::{AmbariClient, DesiredState};

fn tool_suffix(state: DesiredState) -> &'static str {
    match state {
        DesiredState::Started => "start",
        DesiredState::Installed => "stop",
    }
}

/// Tool to start or stop every service of the cluster.
///
/// Registered twice: `start_all_services` and `stop_all_services`.
pub struct AllServicesStateTool {
    client: Arc<AmbariClient>,
    state: DesiredState,
}

impl AllServicesStateTool {
    pub fn new(client: Arc<AmbariClient>, state: DesiredState) -> Self {
        Self { client, state }
    }
}

#[async_trait::async_trait]
impl Tool for AllServicesStateTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: format!("{}_all_services", tool_suffix(self.state)),
            description: format!(
                "{} all services in the cluster. Returns the request id to poll with get_request_status",
                self.state.verb()
            ),
            input_schema: json_schema_empty(),
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult> {
        let cluster = self.client.cluster_name();

        Ok(
            match self.client.services().set_all_state(cluster, self.state).await {
                Ok(outcome) => {
                    CallToolResult::text(render::bulk_state_change(cluster, self.state, &outcome))
                }
                Err(e) => CallToolResult::error(format!(
                    "Unable to {} all services in cluster '{}' - {}",
                    tool_suffix(self.state),
                    cluster,
                    e
                )),
            },
        )
    }
}

/// Tool to start or stop a single service.
///
/// Registered twice: `start_service` and `stop_service`.
pub struct ServiceStateTool {
    client: Arc<AmbariClient>,
    state: DesiredState,
}

impl ServiceStateTool {
    pub fn new(client: Arc<AmbariClient>, state: DesiredState) -> Self {
        Self { client, state }
    }
}

#[derive(Debug, Deserialize)]
struct ServiceStateArgs {
    service_name: String,
}

#[async_trait::async_trait]
impl Tool for ServiceStateTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: format!("{}_service", tool_suffix(self.state)),
            description: format!(
                "{} a specific service in the cluster. Returns the request id to poll with get_request_status",
                self.state.verb()
            ),
            input_schema: json_schema_object(
                serde_json::json!({
                    "service_name": json_schema_string("Name of the service (e.g. HDFS, YARN, HBASE)")
                }),
                vec!["service_name"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ServiceStateArgs = serde_json::from_value(arguments)
            .with_context(|| format!("Invalid arguments for {}_service", tool_suffix(self.state)))?;
        let cluster = self.client.cluster_name();

        Ok(
            match self
                .client
                .services()
                .set_state(cluster, &args.service_name, self.state)
                .await
            {
                Ok(request) => CallToolResult::text(render::service_state_change(
                    cluster,
                    &args.service_name,
                    self.state,
                    request.as_ref(),
                )),
                Err(e) => CallToolResult::error(e.to_string()),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_client;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_tool_names() {
        let client = Arc::new(
            AmbariClient::builder()
                .base_url("http://localhost:8080/api/v1")
                .build()
                .unwrap(),
        );

        let names: Vec<_> = [DesiredState::Started, DesiredState::Installed]
            .into_iter()
            .flat_map(|state| {
                [
                    AllServicesStateTool::new(client.clone(), state).schema().name,
                    ServiceStateTool::new(client.clone(), state).schema().name,
                ]
            })
            .collect();

        assert_eq!(
            names,
            vec!["start_all_services", "start_service", "stop_all_services", "stop_service"]
        );
    }

    #[tokio::test]
    async fn test_start_all_primary() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/v1/clusters/c1/services"))
            .and(body_partial_json(serde_json::json!({"Body": {"ServiceInfo": {"state": "STARTED"}}})))
            .respond_with(ResponseTemplate::new(202).set_body_json(serde_json::json!({
                "Requests": {"id": 17, "status": "Accepted"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tool = AllServicesStateTool::new(test_client(&server), DesiredState::Started);
        let text = tool.execute(serde_json::json!({})).await.unwrap().joined_text();

        assert!(text.starts_with("Start All Services request submitted for cluster 'c1'."));
        assert!(text.contains("Request ID: 17"));
        assert!(text.contains("Status: Accepted"));
        assert!(!text.contains("via fallback endpoint"));
    }

    #[tokio::test]
    async fn test_stop_all_uses_fallback_once() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/v1/clusters/c1/services"))
            .and(query_param("ServiceInfo/state", "STARTED"))
            .respond_with(ResponseTemplate::new(202).set_body_json(serde_json::json!({
                "Requests": {"id": 99, "status": "Accepted"}
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/clusters/c1/services"))
            .respond_with(ResponseTemplate::new(500).set_body_string("server error"))
            .expect(1)
            .mount(&server)
            .await;

        let tool = AllServicesStateTool::new(test_client(&server), DesiredState::Installed);
        let result = tool.execute(serde_json::json!({})).await.unwrap();
        let text = result.joined_text();

        assert!(result.is_error.is_none());
        assert!(text.contains("Request ID: 99"));
        assert!(text.contains("via fallback endpoint"));
    }

    #[tokio::test]
    async fn test_bulk_both_attempts_fail() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(500).set_body_string("down"))
            .expect(2)
            .mount(&server)
            .await;

        let tool = AllServicesStateTool::new(test_client(&server), DesiredState::Started);
        let result = tool.execute(serde_json::json!({})).await.unwrap();

        assert_eq!(result.is_error, Some(true));
        assert!(result
            .joined_text()
            .starts_with("Error: Unable to start all services in cluster 'c1'"));
    }

    #[tokio::test]
    async fn test_bulk_empty_body_means_no_change() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let tool = AllServicesStateTool::new(test_client(&server), DesiredState::Started);
        let text = tool.execute(serde_json::json!({})).await.unwrap().joined_text();

        assert!(text.starts_with("No state change needed"));
    }

    #[tokio::test]
    async fn test_start_service() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/clusters/c1/services/YARN"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ServiceInfo": {"service_name": "YARN", "state": "INSTALLED"}
            })))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/clusters/c1/services/YARN"))
            .and(body_partial_json(serde_json::json!({
                "RequestInfo": {"context": "Start YARN service"}
            })))
            .respond_with(ResponseTemplate::new(202).set_body_json(serde_json::json!({
                "Requests": {"id": 5, "status": "Accepted"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tool = ServiceStateTool::new(test_client(&server), DesiredState::Started);
        let text = tool
            .execute(serde_json::json!({"service_name": "YARN"}))
            .await
            .unwrap()
            .joined_text();

        assert!(text.starts_with("Start request submitted for service 'YARN' in cluster 'c1'."));
        assert!(text.contains("Request ID: 5"));
        assert!(text.contains("get_request_status (request_id=5)"));
    }

    #[tokio::test]
    async fn test_stop_missing_service() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "status": 404, "message": "The requested resource doesn't exist"
            })))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(202))
            .expect(0)
            .mount(&server)
            .await;

        let tool = ServiceStateTool::new(test_client(&server), DesiredState::Installed);
        let result = tool
            .execute(serde_json::json!({"service_name": "NOPE"}))
            .await
            .unwrap();

        assert_eq!(result.is_error, Some(true));
        assert!(result
            .joined_text()
            .starts_with("Error: Service 'NOPE' not found in cluster 'c1'"));
    }
}
