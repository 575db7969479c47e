//! Mock implementations for testing.
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses
//!
//! For notifications, [`crate::notifications::NotificationStore`] already
//! records everything pushed to it and doubles as the test sink.

pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
