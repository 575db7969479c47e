//! Mock HTTP client for testing.
//!
//! Provides a configurable mock HTTP client that can return predefined
//! responses or errors for testing purposes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{Headers, HttpClient, HttpError, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method (GET, POST or DELETE)
    pub method: String,
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body (for POST requests)
    pub body: Option<String>,
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a response (any status)
    Success(Response),
    /// Return an error
    Error(HttpError),
    /// Never answer
    Hang,
}

/// Mock HTTP client for testing.
///
/// This client can be configured to return specific responses for URLs,
/// allowing tests to verify HTTP interactions without network access.
///
/// # Example
///
/// ```ignore
/// use video_sync::adapters::mock::{MockHttpClient, MockResponse};
/// use video_sync::traits::{HttpClient, Response, Headers};
/// use bytes::Bytes;
///
/// let client = MockHttpClient::new();
/// client.set_response(
///     "http://blueos.local/mavlink-camera-manager/streams",
///     MockResponse::Success(Response::new(200, Bytes::from("[]"))),
/// );
///
/// let response = client.get("http://blueos.local/mavlink-camera-manager/streams", &Headers::new()).await?;
/// assert_eq!(response.status, 200);
/// assert_eq!(client.get_requests().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockHttpClient {
    /// Configured responses by URL pattern
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// Default response when no specific match
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_response: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set a response for a URL.
    ///
    /// Exact matches win; otherwise the first configured prefix of the
    /// request URL is used.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(url.to_string(), response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        let mut default = self.default_response.lock().unwrap();
        *default = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    fn record_request(&self, method: &str, url: &str, headers: &Headers, body: Option<String>) {
        let mut requests = self.requests.lock().unwrap();
        requests.push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body,
        });
    }

    fn get_response(&self, url: &str) -> Option<MockResponse> {
        let responses = self.responses.lock().unwrap();

        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }

        // Longest matching prefix wins
        let prefixed = responses
            .iter()
            .filter(|(pattern, _)| url.starts_with(pattern.as_str()))
            .max_by_key(|(pattern, _)| pattern.len());
        if let Some((_, response)) = prefixed {
            return Some(response.clone());
        }

        let default = self.default_response.lock().unwrap();
        default.clone()
    }

    async fn respond(&self, url: &str) -> Result<Response, HttpError> {
        match self.get_response(url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            Some(MockResponse::Hang) => std::future::pending::<Result<Response, HttpError>>().await,
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}

impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("GET", url, headers, None);
        self.respond(url).await
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("POST", url, headers, Some(body.to_string()));
        self.respond(url).await
    }

    async fn delete(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("DELETE", url, headers, None);
        self.respond(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use std::time::Duration;

    #[test]
    fn test_mock_http_client_new() {
        let client = MockHttpClient::new();
        assert!(client.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_get_with_response() {
        let client = MockHttpClient::new();
        client.set_response(
            "http://host/api/v4l",
            MockResponse::Success(Response::new(200, Bytes::from("[]"))),
        );

        let response = client.get("http://host/api/v4l", &Headers::new()).await.unwrap();

        assert_eq!(response.status, 200);
        let requests = client.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "GET");
        assert_eq!(requests[0].url, "http://host/api/v4l");
    }

    #[tokio::test]
    async fn test_delete_prefix_match_records_query() {
        let client = MockHttpClient::new();
        client.set_response(
            "http://host/api/delete_stream",
            MockResponse::Success(Response::new(200, Bytes::new())),
        );

        client
            .delete("http://host/api/delete_stream?name=cam0", &Headers::new())
            .await
            .unwrap();

        let requests = client.get_requests();
        assert_eq!(requests[0].method, "DELETE");
        assert_eq!(requests[0].url, "http://host/api/delete_stream?name=cam0");
        assert!(requests[0].body.is_none());
    }

    #[tokio::test]
    async fn test_longest_prefix_wins() {
        let client = MockHttpClient::new();
        client.set_response(
            "http://host/api",
            MockResponse::Success(Response::new(500, Bytes::new())),
        );
        client.set_response(
            "http://host/api/streams",
            MockResponse::Success(Response::new(200, Bytes::from("[]"))),
        );
        client.set_response(
            "http://host/api/str",
            MockResponse::Success(Response::new(404, Bytes::new())),
        );

        for _ in 0..20 {
            let response = client
                .get("http://host/api/streams?all=true", &Headers::new())
                .await
                .unwrap();
            assert_eq!(response.status, 200);
        }
        let response = client.get("http://host/api/v4l", &Headers::new()).await.unwrap();
        assert_eq!(response.status, 500);
    }

    #[tokio::test]
    async fn test_post_records_body() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::Error(HttpError::ServerError {
            status: 500,
            message: "boom".to_string(),
        }));

        let result = client
            .post("http://host/api/streams", r#"{"name":"cam1"}"#, &Headers::new())
            .await;

        assert!(matches!(result, Err(HttpError::ServerError { status: 500, .. })));
        assert_eq!(
            client.get_requests()[0].body,
            Some(r#"{"name":"cam1"}"#.to_string())
        );
    }

    #[tokio::test]
    async fn test_no_response_configured() {
        let client = MockHttpClient::new();
        let result = client.get("http://host/missing", &Headers::new()).await;
        assert!(matches!(result, Err(HttpError::Other(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_hang_never_resolves() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::Hang);

        let result = tokio::time::timeout(
            Duration::from_secs(60),
            client.get("http://host/api/streams", &Headers::new()),
        )
        .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_clone_shares_requests() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::Success(Response::new(200, Bytes::new())));

        let cloned = client.clone();
        cloned.get("http://host/a", &Headers::new()).await.unwrap();

        assert_eq!(client.get_requests().len(), 1);
        client.clear_requests();
        assert!(cloned.get_requests().is_empty());
    }
}
