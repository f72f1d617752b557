//! Configuration types for the management API client.

use std::time::Duration;
use url::Url;

/// Development defaults, matching a stock single-node install.
pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_USER: &str = "admin";
pub const DEFAULT_PASSWORD: &str = "admin";
pub const DEFAULT_CLUSTER: &str = "c1";

/// Path prefix of the REST API.
pub const API_PREFIX: &str = "/api/v1";

/// Configuration for the management API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL including the API prefix, e.g. `http://localhost:8080/api/v1`.
    pub base_url: Url,
    /// Basic auth user.
    pub username: String,
    /// Basic auth password.
    pub password: String,
    /// Cluster used by operations that do not name one.
    pub cluster_name: String,
    /// Request timeout. `None` keeps the HTTP library default.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a configuration with the given base URL and development credentials.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            username: DEFAULT_USER.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            cluster_name: DEFAULT_CLUSTER.to_string(),
            timeout: None,
        }
    }

    /// Base URL for a plain-HTTP server at `host:port`.
    pub fn base_url_for(host: &str, port: u16) -> Result<Url, url::ParseError> {
        Url::parse(&format!("http://{}:{}{}", host, port, API_PREFIX))
    }

    /// True when the built-in development credentials are in use.
    pub fn uses_default_credentials(&self) -> bool {
        self.username == DEFAULT_USER && self.password == DEFAULT_PASSWORD
    }
}
