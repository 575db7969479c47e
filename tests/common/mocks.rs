//! Mock configurations for test fixtures.
//!
//! Re-exports the mock client from `video_sync::adapters::mock` and adds a
//! builder for canned camera manager responses.

pub use video_sync::adapters::mock::{MockHttpClient, MockResponse, RecordedRequest};
pub use video_sync::traits::{Headers, HttpClient, HttpError, Response};

use bytes::Bytes;

/// Base URL the mock responses are registered under.
pub const MOCK_API: &str = "http://vehicle/mavlink-camera-manager";

/// Configuration for setting up mock HTTP responses.
pub struct MockHttpConfig {
    client: MockHttpClient,
}

impl MockHttpConfig {
    pub fn new() -> Self {
        Self {
            client: MockHttpClient::new(),
        }
    }

    /// Respond to `{MOCK_API}{path}` with `status` and a JSON body.
    pub fn with_json_response(self, path: &str, status: u16, json: &str) -> Self {
        self.client.set_response(
            &format!("{}{}", MOCK_API, path),
            MockResponse::Success(Response::new(status, Bytes::from(json.to_string()))),
        );
        self
    }

    /// Fail requests to `{MOCK_API}{path}` at the transport level.
    pub fn with_transport_error(self, path: &str, error: HttpError) -> Self {
        self.client
            .set_response(&format!("{}{}", MOCK_API, path), MockResponse::Error(error));
        self
    }

    /// Never answer requests to `{MOCK_API}{path}`.
    pub fn with_hanging(self, path: &str) -> Self {
        self.client
            .set_response(&format!("{}{}", MOCK_API, path), MockResponse::Hang);
        self
    }

    pub fn build(self) -> MockHttpClient {
        self.client
    }
}

impl Default for MockHttpConfig {
    fn default() -> Self {
        Self::new()
    }
}
