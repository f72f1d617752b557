//! Cluster API endpoints.

use crate::api::escape;
use crate::client::AmbariClient;
use crate::error::{AmbariError, AmbariResult};
use crate::models::ClusterResponse;

/// Cluster API for reading cluster-level information.
pub struct ClustersApi<'a> {
    client: &'a AmbariClient,
}

impl<'a> ClustersApi<'a> {
    pub(crate) fn new(client: &'a AmbariClient) -> Self {
        Self { client }
    }

    /// Get cluster summary.
    pub async fn info(&self, cluster: &str) -> AmbariResult<ClusterResponse> {
        self.client.http.get(&format!("/clusters/{}", escape(cluster))).await
    }

    /// Read the cluster, turning any failure into a not-found error.
    pub async fn require(&self, cluster: &str) -> AmbariResult<ClusterResponse> {
        self.info(cluster).await.map_err(|e| {
            AmbariError::NotFound(format!(
                "Cluster '{}' not found or inaccessible ({})",
                cluster, e
            ))
        })
    }
}
