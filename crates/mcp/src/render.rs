// Plain-text rendering of management API responses
//
// Output is meant to be read by an LLM caller, not parsed. Failures are
// rendered by the tools themselves with a leading `Error:` marker.

use chrono::DateTime;
use serde_json::Value;
use toolbridge_core::{RequestStatus, ServiceState, StateClass};
use toolbridge_sdk::api::Fallback;
use toolbridge_sdk::models::{
    ClusterResponse, ComponentItem, ConfigurationItem, RequestEnvelope, ServiceItem, ServiceList,
};
use toolbridge_sdk::DesiredState;

/// Hosts listed per component before the rest are summarized
pub const MAX_LISTED_HOSTS: usize = 5;

const UNKNOWN: &str = "Unknown";

fn rule(width: usize) -> String {
    "=".repeat(width)
}

fn or_unknown(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(UNKNOWN)
}

/// Epoch millis as a UTC timestamp; non-positive values mean "not set"
pub fn epoch_millis(ms: i64) -> Option<String> {
    if ms <= 0 {
        return None;
    }
    DateTime::from_timestamp_millis(ms).map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
}

fn property_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn cluster_info(cluster: &str, response: &ClusterResponse) -> String {
    let info = &response.clusters;
    let mut lines = vec![
        format!("Information for cluster '{}':", cluster),
        rule(30),
        format!(
            "Cluster Name: {}",
            info.cluster_name.as_deref().unwrap_or(cluster)
        ),
        format!("Version: {}", or_unknown(&info.version)),
    ];

    if let Some(state) = &info.provisioning_state {
        lines.push(format!("Provisioning State: {}", state));
    }
    if let Some(security) = &info.security_type {
        lines.push(format!("Security Type: {}", security));
    }
    if let Some(hosts) = info.total_hosts {
        lines.push(format!("Total Hosts: {}", hosts));
    }

    lines.join("\n")
}

pub fn service_list(cluster: &str, list: &ServiceList, with_state: bool) -> String {
    let services = match &list.items {
        None => return format!("No results: No services found in cluster '{}'.", cluster),
        Some(items) if items.is_empty() => {
            return format!("No results: No services installed in cluster '{}'.", cluster)
        }
        Some(items) => items,
    };

    let mut lines = vec![
        format!(
            "Service list for cluster '{}' ({} services):",
            cluster,
            services.len()
        ),
        rule(50),
    ];

    for (i, service) in services.iter().enumerate() {
        let info = &service.service_info;
        let name = or_unknown(&info.service_name);
        if with_state {
            let state = or_unknown(&info.state);
            lines.push(format!(
                "{}. {} Service Name: {} [{}]",
                i + 1,
                StateClass::of(state).glyph(),
                name,
                state
            ));
        } else {
            lines.push(format!("{}. Service Name: {}", i + 1, name));
        }
        lines.push(format!(
            "   Cluster: {}",
            info.cluster_name.as_deref().unwrap_or(cluster)
        ));
        lines.push(format!(
            "   API Link: {}",
            service.href.as_deref().unwrap_or("")
        ));
        lines.push(String::new());
    }

    lines.join("\n")
}

pub fn service_status(cluster: &str, service: &str, item: &ServiceItem) -> String {
    let info = &item.service_info;
    let state = or_unknown(&info.state);

    let mut lines = vec![
        format!("Service Status for '{}':", service),
        rule(40),
        format!(
            "Service Name: {}",
            info.service_name.as_deref().unwrap_or(service)
        ),
        format!("Cluster: {}", info.cluster_name.as_deref().unwrap_or(cluster)),
        format!("Current State: {}", state),
    ];

    if let Some(description) = ServiceState::describe(state) {
        lines.push(format!("Description: {}", description));
    }

    lines.join("\n")
}

pub fn service_details(cluster: &str, service: &str, item: &ServiceItem) -> String {
    let info = &item.service_info;
    let state = or_unknown(&info.state);

    let mut lines = vec![
        "Detailed Service Information:".to_string(),
        rule(50),
        format!(
            "Service Name: {}",
            info.service_name.as_deref().unwrap_or(service)
        ),
        format!("Cluster: {}", info.cluster_name.as_deref().unwrap_or(cluster)),
        format!("Current State: {}", state),
    ];

    if let Some(description) = ServiceState::describe(state) {
        lines.push(format!("Description: {}", description));
    }
    if let Some(maintenance) = &info.maintenance_state {
        lines.push(format!("Maintenance State: {}", maintenance));
    }

    if item.components.is_empty() {
        lines.push("\nComponents: No components found".to_string());
    } else {
        lines.push(format!("\nComponents ({} total):", item.components.len()));
        for (i, component) in item.components.iter().enumerate() {
            lines.push(format!(
                "   {}. {}",
                i + 1,
                or_unknown(&component.component_info.component_name)
            ));
        }
    }

    if info.desired_configs.is_some() {
        lines.push("\nConfiguration: Available".to_string());
    }

    lines.push(format!(
        "\nAPI Endpoint: {}",
        item.href.as_deref().unwrap_or("Not available")
    ));

    lines.join("\n")
}

pub fn service_components(cluster: &str, service: &str, components: &[ComponentItem]) -> String {
    if components.is_empty() {
        return format!(
            "No results: No components found for service '{}' in cluster '{}'.",
            service, cluster
        );
    }

    let mut lines = vec![
        format!(
            "Components of service '{}' in cluster '{}' ({} components):",
            service,
            cluster,
            components.len()
        ),
        rule(50),
    ];

    for (i, component) in components.iter().enumerate() {
        let info = &component.component_info;
        let state = or_unknown(&info.state);
        lines.push(format!(
            "{}. {} {} [{}]",
            i + 1,
            StateClass::of(state).glyph(),
            or_unknown(&info.component_name),
            state
        ));

        if let Some(category) = &info.category {
            lines.push(format!("   Category: {}", category));
        }
        if info.started_count.is_some() || info.installed_count.is_some() || info.total_count.is_some() {
            let count = |c: Option<u64>| c.map_or_else(|| "?".to_string(), |c| c.to_string());
            lines.push(format!(
                "   Instances: {} started / {} installed / {} total",
                count(info.started_count),
                count(info.installed_count),
                count(info.total_count)
            ));
        }

        let hosts = &component.host_components;
        if !hosts.is_empty() {
            lines.push(format!("   Hosts ({}):", hosts.len()));
            for host in hosts.iter().take(MAX_LISTED_HOSTS) {
                let roles = &host.host_roles;
                lines.push(format!(
                    "     - {} [{}]",
                    or_unknown(&roles.host_name),
                    or_unknown(&roles.state)
                ));
            }
            if hosts.len() > MAX_LISTED_HOSTS {
                lines.push(format!("     ... +{} more", hosts.len() - MAX_LISTED_HOSTS));
            }
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

/// One config type: the latest tag and its tag-scoped properties
pub fn config_section(config_type: &str, latest: &ConfigurationItem, tagged: &ConfigurationItem) -> String {
    let mut lines = vec![format!(
        "[{}] tag: {} (version {})",
        config_type,
        or_unknown(&latest.tag),
        latest
            .version
            .map_or_else(|| UNKNOWN.to_string(), |v| v.to_string())
    )];

    if tagged.properties.is_empty() {
        lines.push("  (no properties)".to_string());
    }
    for (key, value) in &tagged.properties {
        lines.push(format!("  {} = {}", key, property_value(value)));
    }

    if !tagged.properties_attributes.is_empty() {
        lines.push("  Attributes:".to_string());
        for (attribute, entries) in &tagged.properties_attributes {
            for (key, value) in entries {
                lines.push(format!("    {}: {} = {}", attribute, key, property_value(value)));
            }
        }
    }

    lines.join("\n")
}

/// A config type that could not be read
pub fn config_section_error(config_type: &str, error: &impl std::fmt::Display) -> String {
    format!("[{}]\n  Error: {}", config_type, error)
}

pub fn config_header(cluster: &str, service: &str) -> String {
    format!(
        "Configuration for service '{}' in cluster '{}':\n{}",
        service,
        cluster,
        rule(50)
    )
}

fn submitted_request(lines: &mut Vec<String>, request: &RequestEnvelope) {
    let info = &request.requests;
    match info.id {
        Some(id) => lines.push(format!("Request ID: {}", id)),
        None => lines.push("Request ID: Unknown".to_string()),
    }
    if let Some(status) = info.status.as_ref().or(info.request_status.as_ref()) {
        lines.push(format!("Status: {}", status));
    }
    if let Some(id) = info.id {
        lines.push(format!(
            "Track progress with get_request_status (request_id={}).",
            id
        ));
    }
}

pub fn bulk_state_change(
    cluster: &str,
    state: DesiredState,
    outcome: &Fallback<Option<RequestEnvelope>>,
) -> String {
    let mut lines = Vec::new();

    match &outcome.value {
        Some(request) => {
            lines.push(format!(
                "{} All Services request submitted for cluster '{}'.",
                state.verb(),
                cluster
            ));
            submitted_request(&mut lines, request);
        }
        None => lines.push(format!(
            "No state change needed: services in cluster '{}' are already {}.",
            cluster, state
        )),
    }

    if outcome.used_fallback() {
        let reason = outcome
            .primary_error
            .as_ref()
            .map(|e| e.to_string())
            .unwrap_or_default();
        lines.push(format!("(via fallback endpoint; primary attempt failed: {})", reason));
    }

    lines.join("\n")
}

pub fn service_state_change(
    cluster: &str,
    service: &str,
    state: DesiredState,
    request: Option<&RequestEnvelope>,
) -> String {
    let mut lines = Vec::new();

    match request {
        Some(request) => {
            lines.push(format!(
                "{} request submitted for service '{}' in cluster '{}'.",
                state.verb(),
                service,
                cluster
            ));
            submitted_request(&mut lines, request);
        }
        None => lines.push(format!(
            "No state change needed: service '{}' is already {}.",
            service, state
        )),
    }

    lines.join("\n")
}

pub fn active_requests(cluster: &str, outcome: &Fallback<Vec<RequestEnvelope>>) -> String {
    let requests = &outcome.value;
    let mut lines = Vec::new();

    if requests.is_empty() {
        lines.push(format!("No active requests in cluster '{}'.", cluster));
    } else {
        lines.push(format!(
            "Active requests in cluster '{}' ({}):",
            cluster,
            requests.len()
        ));
        lines.push(rule(50));

        for (i, request) in requests.iter().enumerate() {
            let info = &request.requests;
            lines.push(format!(
                "{}. Request {} [{}]",
                i + 1,
                info.id.map_or_else(|| UNKNOWN.to_string(), |id| id.to_string()),
                or_unknown(&info.request_status)
            ));
            if let Some(progress) = info.progress_percent {
                lines.push(format!("   Progress: {}%", progress));
            }
            if let Some(context) = &info.request_context {
                lines.push(format!("   Context: {}", context));
            }
            if let Some(started) = info.start_time.and_then(epoch_millis) {
                lines.push(format!("   Started: {}", started));
            }
            lines.push(String::new());
        }
    }

    if outcome.used_fallback() {
        lines.push("(status filter not supported by server; filtered locally)".to_string());
    }

    lines.join("\n")
}

pub fn request_status(request_id: u64, request: &RequestEnvelope) -> String {
    let info = &request.requests;
    let status = or_unknown(&info.request_status);

    let mut lines = vec![
        format!(
            "Request {} status:",
            info.id.unwrap_or(request_id)
        ),
        rule(40),
        format!("Status: {}", status),
    ];

    if let Some(description) = RequestStatus::describe(status) {
        lines.push(format!("Description: {}", description));
    }
    if let Some(progress) = info.progress_percent {
        lines.push(format!("Progress: {}%", progress));
    }
    if let Some(context) = &info.request_context {
        lines.push(format!("Context: {}", context));
    }
    if let Some(started) = info.start_time.and_then(epoch_millis) {
        lines.push(format!("Start Time: {}", started));
    }
    if let Some(ended) = info.end_time.and_then(epoch_millis) {
        lines.push(format!("End Time: {}", ended));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolbridge_sdk::api::Attempt;
    use toolbridge_sdk::AmbariError;

    fn services(json: serde_json::Value) -> ServiceList {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_epoch_millis() {
        assert_eq!(
            epoch_millis(1_700_000_000_000).as_deref(),
            Some("2023-11-14 22:13:20 UTC")
        );
        assert_eq!(epoch_millis(-1), None);
        assert_eq!(epoch_millis(0), None);
    }

    #[test]
    fn test_cluster_info_optional_lines() {
        let response: ClusterResponse = serde_json::from_value(serde_json::json!({
            "Clusters": {"cluster_name": "c1"}
        }))
        .unwrap();

        let text = cluster_info("c1", &response);
        assert!(text.contains("Cluster Name: c1"));
        assert!(text.contains("Version: Unknown"));
        assert!(!text.contains("Provisioning State"));
        assert!(!text.contains("Security Type"));
    }

    #[test]
    fn test_service_list_block_per_item() {
        for count in [1usize, 2, 7] {
            let items: Vec<_> = (0..count)
                .map(|i| serde_json::json!({"ServiceInfo": {"service_name": format!("S{}", i), "state": "STARTED"}}))
                .collect();
            let text = service_list("c1", &services(serde_json::json!({"items": items})), true);
            assert_eq!(text.matches("Service Name:").count(), count);
        }
    }

    #[test]
    fn test_service_list_empty_and_missing() {
        let empty = service_list("c1", &services(serde_json::json!({"items": []})), true);
        assert_eq!(empty, "No results: No services installed in cluster 'c1'.");

        let missing = service_list("c1", &services(serde_json::json!({})), true);
        assert_eq!(missing, "No results: No services found in cluster 'c1'.");
    }

    #[test]
    fn test_service_list_glyphs() {
        let list = services(serde_json::json!({"items": [
            {"ServiceInfo": {"service_name": "HDFS", "state": "STARTED"}},
            {"ServiceInfo": {"service_name": "YARN", "state": "INSTALLED"}},
            {"ServiceInfo": {"service_name": "HBASE", "state": "STARTING"}}
        ]}));

        let text = service_list("c1", &list, true);
        assert!(text.contains("1. 🟢 Service Name: HDFS [STARTED]"));
        assert!(text.contains("2. 🔴 Service Name: YARN [INSTALLED]"));
        assert!(text.contains("3. 🟡 Service Name: HBASE [STARTING]"));

        let plain = service_list("c1", &list, false);
        assert!(plain.contains("1. Service Name: HDFS\n"));
        assert!(!plain.contains('['));
    }

    #[test]
    fn test_component_hosts_truncated() {
        let hosts: Vec<_> = (1..=8)
            .map(|i| serde_json::json!({"HostRoles": {"host_name": format!("node{}", i), "state": "STARTED"}}))
            .collect();
        let component: ComponentItem = serde_json::from_value(serde_json::json!({
            "ServiceComponentInfo": {"component_name": "DATANODE", "state": "STARTED", "category": "SLAVE",
                                     "started_count": 8, "installed_count": 0, "total_count": 8},
            "host_components": hosts
        }))
        .unwrap();

        let text = service_components("c1", "HDFS", &[component]);
        assert!(text.contains("node5 [STARTED]"));
        assert!(!text.contains("node6"));
        assert!(text.contains("... +3 more"));
        assert!(text.contains("Instances: 8 started / 0 installed / 8 total"));
    }

    #[test]
    fn test_bulk_state_change_via_fallback() {
        let envelope: RequestEnvelope = serde_json::from_value(serde_json::json!({
            "Requests": {"id": 42, "status": "Accepted"}
        }))
        .unwrap();
        let outcome = Fallback {
            value: Some(envelope),
            attempt: Attempt::Fallback,
            primary_error: Some(AmbariError::from_response(500, "nope")),
        };

        let text = bulk_state_change("c1", DesiredState::Started, &outcome);
        assert!(text.starts_with("Start All Services request submitted"));
        assert!(text.contains("Request ID: 42"));
        assert!(text.contains("via fallback endpoint"));
    }

    #[test]
    fn test_request_status_unknown_tag() {
        let envelope: RequestEnvelope = serde_json::from_value(serde_json::json!({
            "Requests": {"id": 3, "request_status": "HOLDING"}
        }))
        .unwrap();

        let text = request_status(3, &envelope);
        assert!(text.contains("Status: HOLDING"));
        assert!(!text.contains("Description:"));
        assert!(!text.contains("Start Time"));
    }
}
