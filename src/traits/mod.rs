//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP client operations (GET, POST, DELETE)
//! - [`NotificationSink`] - Destination for user-facing notifications

pub mod http;
pub mod notifications;

pub use http::{Headers, HttpClient, HttpError, Response};
pub use notifications::NotificationSink;
