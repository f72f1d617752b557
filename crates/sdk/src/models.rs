//! Response and request shapes of the management API.
//!
//! The API does not promise which fields are present (it depends on the
//! `fields=` projection), so nearly everything is optional or defaulted.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use toolbridge_core::{DesiredState, RequestStatus};

/// `GET /clusters/{name}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClusterResponse {
    #[serde(default)]
    pub href: Option<String>,
    #[serde(rename = "Clusters", default)]
    pub clusters: ClusterInfo,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClusterInfo {
    #[serde(default)]
    pub cluster_name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub provisioning_state: Option<String>,
    #[serde(default)]
    pub security_type: Option<String>,
    #[serde(default)]
    pub total_hosts: Option<u64>,
}

/// `GET /clusters/{name}/services`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceList {
    /// `None` when the response had no `items` key at all.
    #[serde(default)]
    pub items: Option<Vec<ServiceItem>>,
}

/// One service, either as a list item or from `GET /clusters/{c}/services/{s}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceItem {
    #[serde(default)]
    pub href: Option<String>,
    #[serde(rename = "ServiceInfo", default)]
    pub service_info: ServiceInfo,
    #[serde(default)]
    pub components: Vec<ComponentItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceInfo {
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub cluster_name: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub maintenance_state: Option<String>,
    #[serde(default)]
    pub desired_configs: Option<Value>,
}

/// `GET /clusters/{c}/services/{s}/components`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComponentList {
    #[serde(default)]
    pub items: Vec<ComponentItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComponentItem {
    #[serde(default)]
    pub href: Option<String>,
    #[serde(rename = "ServiceComponentInfo", default)]
    pub component_info: ComponentInfo,
    #[serde(default)]
    pub host_components: Vec<HostComponentItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComponentInfo {
    #[serde(default)]
    pub component_name: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub started_count: Option<u64>,
    #[serde(default)]
    pub installed_count: Option<u64>,
    #[serde(default)]
    pub total_count: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostComponentItem {
    #[serde(rename = "HostRoles", default)]
    pub host_roles: HostRoles,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostRoles {
    #[serde(default)]
    pub host_name: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

/// `GET /clusters/{c}/configurations?type=...[&tag=...]`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigurationList {
    #[serde(default)]
    pub items: Vec<ConfigurationItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigurationItem {
    #[serde(rename = "type", default)]
    pub config_type: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub version: Option<i64>,
    #[serde(default)]
    pub href: Option<String>,
    /// Only present on tag-scoped reads.
    #[serde(default)]
    pub properties: BTreeMap<String, Value>,
    #[serde(default)]
    pub properties_attributes: BTreeMap<String, BTreeMap<String, Value>>,
}

/// `GET /clusters/{c}/requests`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestList {
    #[serde(default)]
    pub items: Vec<RequestEnvelope>,
}

/// A request (long-running operation), also the body of a 202 Accepted reply.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestEnvelope {
    #[serde(default)]
    pub href: Option<String>,
    #[serde(rename = "Requests", default)]
    pub requests: RequestInfo,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestInfo {
    #[serde(default)]
    pub id: Option<u64>,
    /// Set on 202 replies to mutations, e.g. `Accepted`.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub request_status: Option<String>,
    #[serde(default)]
    pub progress_percent: Option<f64>,
    #[serde(default)]
    pub request_context: Option<String>,
    /// Epoch millis; `-1` means not set.
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub end_time: Option<i64>,
}

impl RequestInfo {
    /// Whether the request is still running, judged by `request_status`.
    pub fn is_active(&self) -> bool {
        self.request_status
            .as_deref()
            .is_some_and(RequestStatus::is_active_tag)
    }
}

/// Body of a service state change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateChangeRequest {
    #[serde(rename = "RequestInfo")]
    pub request_info: RequestContext,
    #[serde(rename = "Body")]
    pub body: StateChangeBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    pub context: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateChangeBody {
    #[serde(rename = "ServiceInfo")]
    pub service_info: DesiredServiceInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesiredServiceInfo {
    pub state: String,
}

impl StateChangeRequest {
    pub fn new(state: DesiredState, context: impl Into<String>) -> Self {
        Self {
            request_info: RequestContext {
                context: context.into(),
            },
            body: StateChangeBody {
                service_info: DesiredServiceInfo {
                    state: state.as_tag().to_string(),
                },
            },
        }
    }
}
