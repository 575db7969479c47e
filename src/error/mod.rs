//! Error types for the synchronization layer.
//!
//! Transport failures are described by [`HttpError`]. Above the transport
//! the store distinguishes exactly one kind, [`RemoteCallError`]: the remote
//! call failed, whether the server answered with a non-2xx status, the
//! connection broke, or the response could not be decoded.
//!
//! `RemoteCallError` never escapes an action; it is turned into a
//! notification by [`crate::notifications::failure_notification`].

use thiserror::Error;

pub use crate::traits::HttpError;

/// A remote call made on behalf of `operation` failed.
///
/// Displays as the underlying transport error so notification messages can
/// interpolate it directly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{source}")]
pub struct RemoteCallError {
    /// Short name of the store operation, for logs
    pub operation: &'static str,
    pub source: HttpError,
}

impl RemoteCallError {
    pub fn new(operation: &'static str, source: HttpError) -> Self {
        Self { operation, source }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self.source, HttpError::Timeout(_))
    }

    /// HTTP status when the server answered with a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        match self.source {
            HttpError::ServerError { status, .. } => Some(status),
            _ => None,
        }
    }
}

/// Result type for remote calls made by the store.
pub type SyncResult<T> = Result<T, RemoteCallError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display_is_transport_text() {
        let err = RemoteCallError::new(
            "create_stream",
            HttpError::ServerError {
                status: 500,
                message: "Device busy".to_string(),
            },
        );
        assert_eq!(err.to_string(), "Server error (500): Device busy");
        assert_eq!(err.status(), Some(500));
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_source_chain() {
        let err = RemoteCallError::new("delete_stream", HttpError::Timeout("10s".to_string()));
        assert!(err.is_timeout());
        assert_eq!(err.status(), None);
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "Request timeout: 10s");
    }
}
