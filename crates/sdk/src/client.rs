//! Main client for the management API.

use crate::api::*;
use crate::config::{ClientConfig, DEFAULT_HOST, DEFAULT_PORT};
use crate::error::{AmbariError, AmbariResult};
use crate::transport::HttpTransport;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Main client for interacting with the management API.
#[derive(Debug, Clone)]
pub struct AmbariClient {
    config: Arc<ClientConfig>,
    pub(crate) http: HttpTransport,
}

impl AmbariClient {
    /// Create a new client builder.
    pub fn builder() -> AmbariClientBuilder {
        AmbariClientBuilder::new()
    }

    /// Create a client from configuration.
    pub fn from_config(config: ClientConfig) -> AmbariResult<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Cluster used when a caller does not name one.
    pub fn cluster_name(&self) -> &str {
        &self.config.cluster_name
    }

    /// Get the clusters API.
    pub fn clusters(&self) -> ClustersApi<'_> {
        ClustersApi::new(self)
    }

    /// Get the services API.
    pub fn services(&self) -> ServicesApi<'_> {
        ServicesApi::new(self)
    }

    /// Get the configurations API.
    pub fn configurations(&self) -> ConfigurationsApi<'_> {
        ConfigurationsApi::new(self)
    }

    /// Get the requests (operations) API.
    pub fn requests(&self) -> RequestsApi<'_> {
        RequestsApi::new(self)
    }
}

/// Builder for creating an AmbariClient.
pub struct AmbariClientBuilder {
    base_url: Option<String>,
    host: String,
    port: u16,
    username: Option<String>,
    password: Option<String>,
    cluster_name: Option<String>,
    timeout: Option<Duration>,
}

impl AmbariClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            username: None,
            password: None,
            cluster_name: None,
            timeout: None,
        }
    }

    /// Set the full base URL, including `/api/v1`. Overrides host and port.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the server host.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the server port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set basic auth credentials.
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set the default cluster.
    pub fn cluster_name(mut self, name: impl Into<String>) -> Self {
        self.cluster_name = Some(name.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> AmbariResult<AmbariClient> {
        let base_url = match self.base_url {
            Some(url) => Url::parse(&url)?,
            None => ClientConfig::base_url_for(&self.host, self.port)?,
        };

        let mut config = ClientConfig::new(base_url);
        if let Some(username) = self.username {
            config.username = username;
        }
        if let Some(password) = self.password {
            config.password = password;
        }
        if let Some(cluster_name) = self.cluster_name {
            if cluster_name.trim().is_empty() {
                return Err(AmbariError::Config("cluster name must not be empty".to_string()));
            }
            config.cluster_name = cluster_name;
        }
        config.timeout = self.timeout;

        AmbariClient::from_config(config)
    }
}

impl Default for AmbariClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
