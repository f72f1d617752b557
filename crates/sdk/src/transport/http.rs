//! HTTP transport layer for the management API.

use crate::config::ClientConfig;
use crate::error::{AmbariError, AmbariResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::{header, Client, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// Status codes treated as success. Mutations answer 202 Accepted.
const SUCCESS_CODES: [u16; 3] = [200, 201, 202];

/// HTTP transport for making API requests.
///
/// Every call issues exactly one request; there is no retry. Connections are
/// not kept idle between calls, so each call's connection closes when it ends.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> AmbariResult<Self> {
        let mut headers = header::HeaderMap::new();

        let credentials = STANDARD.encode(format!("{}:{}", config.username, config.password));
        let mut auth = header::HeaderValue::from_str(&format!("Basic {}", credentials))
            .map_err(|_| AmbariError::Config("Invalid credentials format".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let mut builder = Client::builder()
            .default_headers(headers)
            .pool_max_idle_per_host(0);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Build the full URL for an API path such as `/clusters/c1?fields=...`.
    ///
    /// The path is appended to the base URL as-is so query predicates survive untouched.
    pub(crate) fn build_url(&self, path: &str) -> AmbariResult<Url> {
        let base = self.config.base_url.as_str().trim_end_matches('/');
        let url = if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        };
        Ok(Url::parse(&url)?)
    }

    /// Send one request and return the body of a successful response.
    async fn execute(&self, request: RequestBuilder) -> AmbariResult<String> {
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Request failed");
            AmbariError::from(e)
        })?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        if SUCCESS_CODES.contains(&status) {
            Ok(body)
        } else {
            warn!(status = status, "API returned error status");
            Err(AmbariError::from_response(status, &body))
        }
    }

    /// Execute a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> AmbariResult<T> {
        let url = self.build_url(path)?;
        debug!(url = %url, "GET request");

        let body = self.execute(self.client.get(url)).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Execute a PUT request. A success with an empty body yields `None`.
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> AmbariResult<Option<T>> {
        let url = self.build_url(path)?;
        debug!(url = %url, "PUT request");

        let text = self.execute(self.client.put(url).json(body)).await?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&text)?))
    }
}
