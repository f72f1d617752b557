pub mod cluster;
pub mod filesystem;
pub mod lifecycle;
pub mod requests;
pub mod services;
mod registry;

pub use cluster::{ClusterInfoTool, ClusterServicesTool};
pub use filesystem::ListDirectoryEntriesTool;
pub use lifecycle::{AllServicesStateTool, ServiceStateTool};
pub use requests::{ActiveRequestsTool, RequestStatusTool};
pub use services::{
    ServiceComponentsTool, ServiceConfigurationsTool, ServiceDetailsTool, ServiceStatusTool,
};
pub use registry::{
    json_schema_boolean, json_schema_empty, json_schema_object, json_schema_string, Tool,
    ToolRegistry,
};

use std::sync::Arc;
use toolbridge_sdk::{AmbariClient, DesiredState};

/// Register every cluster management tool against one shared client
pub fn register_cluster_tools(registry: &mut ToolRegistry, client: Arc<AmbariClient>) {
    registry.register(Arc::new(ClusterInfoTool::new(client.clone())));
    registry.register(Arc::new(ClusterServicesTool::new(client.clone())));
    registry.register(Arc::new(ServiceStatusTool::new(client.clone())));
    registry.register(Arc::new(ServiceDetailsTool::new(client.clone())));
    registry.register(Arc::new(ServiceComponentsTool::new(client.clone())));
    registry.register(Arc::new(ServiceConfigurationsTool::new(client.clone())));

    for state in [DesiredState::Started, DesiredState::Installed] {
        registry.register(Arc::new(AllServicesStateTool::new(client.clone(), state)));
        registry.register(Arc::new(ServiceStateTool::new(client.clone(), state)));
    }

    registry.register(Arc::new(ActiveRequestsTool::new(client.clone())));
    registry.register(Arc::new(RequestStatusTool::new(client)));
}

/// Register the local filesystem tools
pub fn register_filesystem_tools(registry: &mut ToolRegistry) {
    registry.register(Arc::new(ListDirectoryEntriesTool));
}

#[cfg(test)]
pub(crate) fn test_client(server: &wiremock::MockServer) -> Arc<AmbariClient> {
    Arc::new(
        AmbariClient::builder()
            .base_url(format!("{}/api/v1", server.uri()))
            .credentials("admin", "admin")
            .cluster_name("c1")
            .build()
            .unwrap(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_cluster_tools() {
        let client = Arc::new(
            AmbariClient::builder()
                .base_url("http://localhost:8080/api/v1")
                .build()
                .unwrap(),
        );
        let mut registry = ToolRegistry::new();
        register_cluster_tools(&mut registry, client);

        let names: Vec<_> = registry.list_schemas().into_iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                "get_active_requests",
                "get_cluster_info",
                "get_cluster_services",
                "get_request_status",
                "get_service_components",
                "get_service_configurations",
                "get_service_details",
                "get_service_status",
                "start_all_services",
                "start_service",
                "stop_all_services",
                "stop_service",
            ]
        );
    }
}
