//! Service API endpoints.

use crate::api::fallback::{with_fallback, Fallback};
use crate::api::escape;
use crate::client::AmbariClient;
use crate::error::{AmbariError, AmbariResult};
use crate::models::{ComponentItem, ComponentList, RequestEnvelope, ServiceItem, ServiceList, StateChangeRequest};
use toolbridge_core::DesiredState;

const LIST_FIELDS_WITH_STATE: &str =
    "ServiceInfo/service_name,ServiceInfo/state,ServiceInfo/cluster_name";
const LIST_FIELDS: &str = "ServiceInfo/service_name,ServiceInfo/cluster_name";
const STATUS_FIELDS: &str = "ServiceInfo/state,ServiceInfo/service_name,ServiceInfo/cluster_name";
const DETAIL_FIELDS: &str = "ServiceInfo,components/ServiceComponentInfo";
const COMPONENT_FIELDS: &str = "ServiceComponentInfo/component_name,ServiceComponentInfo/state,\
ServiceComponentInfo/category,ServiceComponentInfo/started_count,\
ServiceComponentInfo/installed_count,ServiceComponentInfo/total_count,\
host_components/HostRoles/host_name,host_components/HostRoles/state";

/// Service API for reading and changing services.
pub struct ServicesApi<'a> {
    client: &'a AmbariClient,
}

impl<'a> ServicesApi<'a> {
    pub(crate) fn new(client: &'a AmbariClient) -> Self {
        Self { client }
    }

    /// List services, optionally with their current state.
    pub async fn list(&self, cluster: &str, with_state: bool) -> AmbariResult<ServiceList> {
        let fields = if with_state { LIST_FIELDS_WITH_STATE } else { LIST_FIELDS };
        self.client
            .http
            .get(&format!("/clusters/{}/services?fields={}", escape(cluster), fields))
            .await
    }

    /// Get a service's state.
    pub async fn status(&self, cluster: &str, service: &str) -> AmbariResult<ServiceItem> {
        self.client
            .http
            .get(&format!(
                "/clusters/{}/services/{}?fields={}",
                escape(cluster),
                escape(service),
                STATUS_FIELDS
            ))
            .await
    }

    /// Get a service with its components, after checking the cluster exists.
    pub async fn details(&self, cluster: &str, service: &str) -> AmbariResult<ServiceItem> {
        self.client.clusters().require(cluster).await?;

        self.client
            .http
            .get(&format!(
                "/clusters/{}/services/{}?fields={}",
                escape(cluster),
                escape(service),
                DETAIL_FIELDS
            ))
            .await
            .map_err(|e| service_not_found(cluster, service, e))
    }

    /// List a service's components with per-host state.
    pub async fn components(&self, cluster: &str, service: &str) -> AmbariResult<Vec<ComponentItem>> {
        let list: ComponentList = self
            .client
            .http
            .get(&format!(
                "/clusters/{}/services/{}/components?fields={}",
                escape(cluster),
                escape(service),
                COMPONENT_FIELDS
            ))
            .await?;
        Ok(list.items)
    }

    /// Change one service's state.
    ///
    /// Returns the created request, or `None` when the server had nothing to do.
    pub async fn set_state(
        &self,
        cluster: &str,
        service: &str,
        state: DesiredState,
    ) -> AmbariResult<Option<RequestEnvelope>> {
        self.status(cluster, service)
            .await
            .map_err(|e| service_not_found(cluster, service, e))?;

        let body = StateChangeRequest::new(state, format!("{} {} service", state.verb(), service));
        tracing::info!(cluster, service, state = %state, "Changing service state");

        self.client
            .http
            .put(
                &format!("/clusters/{}/services/{}", escape(cluster), escape(service)),
                &body,
            )
            .await
    }

    /// Change the state of every service in the cluster.
    ///
    /// Falls back once to a state-filtered form of the endpoint, which only
    /// targets services currently in the opposite state.
    pub async fn set_all_state(
        &self,
        cluster: &str,
        state: DesiredState,
    ) -> AmbariResult<Fallback<Option<RequestEnvelope>>> {
        let body = StateChangeRequest::new(state, format!("{} All Services", state.verb()));
        let primary_path = format!("/clusters/{}/services", escape(cluster));
        let fallback_path = format!(
            "/clusters/{}/services?ServiceInfo/state={}",
            escape(cluster),
            state.opposite().as_tag()
        );
        tracing::info!(cluster, state = %state, "Changing state of all services");

        let http = &self.client.http;
        with_fallback(http.put(&primary_path, &body), || {
            http.put(&fallback_path, &body)
        })
        .await
    }
}

fn service_not_found(cluster: &str, service: &str, e: AmbariError) -> AmbariError {
    AmbariError::NotFound(format!(
        "Service '{}' not found in cluster '{}' ({})",
        service, cluster, e
    ))
}
