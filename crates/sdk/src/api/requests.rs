//! Request (long-running operation) API endpoints.

use crate::api::fallback::{with_fallback, Fallback};
use crate::api::escape;
use crate::client::AmbariClient;
use crate::error::{AmbariError, AmbariResult};
use crate::models::{RequestEnvelope, RequestList};
use toolbridge_core::RequestStatus;

const REQUEST_FIELDS: &str = "Requests/id,Requests/request_status,Requests/request_context,\
Requests/start_time,Requests/progress_percent";

/// Requests API for tracking operations.
pub struct RequestsApi<'a> {
    client: &'a AmbariClient,
}

impl<'a> RequestsApi<'a> {
    pub(crate) fn new(client: &'a AmbariClient) -> Self {
        Self { client }
    }

    /// List requests that are still running.
    ///
    /// The status predicate is evaluated server side when supported. Servers that
    /// reject it get one unfiltered read, newest first, filtered here instead.
    pub async fn active(&self, cluster: &str) -> AmbariResult<Fallback<Vec<RequestEnvelope>>> {
        let cluster = escape(cluster);
        let filtered = format!(
            "/clusters/{}/requests?fields={}&Requests/request_status.in({})",
            cluster,
            REQUEST_FIELDS,
            RequestStatus::active_tags()
        );
        let unfiltered = format!(
            "/clusters/{}/requests?fields={}&sortBy=Requests/id.desc",
            cluster, REQUEST_FIELDS
        );

        let http = &self.client.http;
        with_fallback(
            async {
                let list: RequestList = http.get(&filtered).await?;
                Ok::<_, AmbariError>(list.items)
            },
            || async {
                let list: RequestList = http.get(&unfiltered).await?;
                Ok::<_, AmbariError>(list
                    .items
                    .into_iter()
                    .filter(|r| r.requests.is_active())
                    .collect::<Vec<_>>())
            },
        )
        .await
    }

    /// Get one request by id.
    pub async fn get(&self, cluster: &str, request_id: u64) -> AmbariResult<RequestEnvelope> {
        self.client
            .http
            .get(&format!("/clusters/{}/requests/{}", escape(cluster), request_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::Attempt;
    use crate::AmbariClient;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> AmbariClient {
        AmbariClient::builder()
            .base_url(format!("{}/api/v1", server.uri()))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_active_filtered_server_side() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/clusters/c1/requests"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [{"Requests": {"id": 9, "request_status": "IN_PROGRESS", "progress_percent": 40.0}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let outcome = client.requests().active("c1").await.unwrap();

        assert_eq!(outcome.attempt, Attempt::Primary);
        assert_eq!(outcome.value.len(), 1);
        assert_eq!(outcome.value[0].requests.id, Some(9));
    }

    #[tokio::test]
    async fn test_active_falls_back_to_client_side_filter() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/clusters/c1/requests"))
            .and(query_param("sortBy", "Requests/id.desc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [
                    {"Requests": {"id": 12, "request_status": "PENDING"}},
                    {"Requests": {"id": 11, "request_status": "COMPLETED"}},
                    {"Requests": {"id": 10, "request_status": "IN_PROGRESS"}},
                    {"Requests": {"id": 9, "request_status": "FAILED"}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/clusters/c1/requests"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "status": 400, "message": "Invalid Request: Malformed predicate"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let outcome = client.requests().active("c1").await.unwrap();

        assert!(outcome.used_fallback());
        let ids: Vec<_> = outcome.value.iter().filter_map(|r| r.requests.id).collect();
        assert_eq!(ids, vec![12, 10]);
    }

    #[tokio::test]
    async fn test_get_request() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/clusters/c1/requests/33"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Requests": {
                    "id": 33,
                    "request_status": "COMPLETED",
                    "progress_percent": 100.0,
                    "request_context": "Start All Services",
                    "start_time": 1_700_000_000_000_i64,
                    "end_time": 1_700_000_060_000_i64
                }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let request = client.requests().get("c1", 33).await.unwrap();

        assert_eq!(request.requests.request_status.as_deref(), Some("COMPLETED"));
        assert_eq!(request.requests.end_time, Some(1_700_000_060_000));
    }
}
