//! Configuration API endpoints.

use crate::api::escape;
use crate::client::AmbariClient;
use crate::error::{AmbariError, AmbariResult};
use crate::models::{ConfigurationItem, ConfigurationList};

/// Configuration API for reading versioned config bundles.
pub struct ConfigurationsApi<'a> {
    client: &'a AmbariClient,
}

impl<'a> ConfigurationsApi<'a> {
    pub(crate) fn new(client: &'a AmbariClient) -> Self {
        Self { client }
    }

    /// List every tag of a config type.
    pub async fn by_type(&self, cluster: &str, config_type: &str) -> AmbariResult<Vec<ConfigurationItem>> {
        let list: ConfigurationList = self
            .client
            .http
            .get(&format!(
                "/clusters/{}/configurations?type={}",
                escape(cluster),
                escape(config_type)
            ))
            .await?;
        Ok(list.items)
    }

    /// Latest tag of a config type: the last item, as the API lists tags oldest first.
    pub async fn latest(&self, cluster: &str, config_type: &str) -> AmbariResult<ConfigurationItem> {
        self.by_type(cluster, config_type)
            .await?
            .pop()
            .ok_or_else(|| {
                AmbariError::NotFound(format!("No configuration found for type '{}'", config_type))
            })
    }

    /// Properties of one tag of a config type.
    pub async fn by_tag(
        &self,
        cluster: &str,
        config_type: &str,
        tag: &str,
    ) -> AmbariResult<ConfigurationItem> {
        let list: ConfigurationList = self
            .client
            .http
            .get(&format!(
                "/clusters/{}/configurations?type={}&tag={}",
                escape(cluster),
                escape(config_type),
                escape(tag)
            ))
            .await?;

        list.items.into_iter().next().ok_or_else(|| {
            AmbariError::NotFound(format!(
                "No properties found for '{}' tag '{}'",
                config_type, tag
            ))
        })
    }
}
