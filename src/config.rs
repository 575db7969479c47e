//! Connection settings for the video manager service.

use std::time::Duration;

/// Host used when `VIDEO_SYNC_HOST` is not set.
pub const DEFAULT_HOST: &str = "http://blueos.local";
/// Path under which the video manager serves its API.
pub const VIDEO_MANAGER_PATH: &str = "/mavlink-camera-manager";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Configuration for the video store and its updater.
///
/// Use the builder pattern to customize it.
///
/// # Example
///
/// ```ignore
/// use video_sync::config::SyncConfig;
///
/// let config = SyncConfig::default()
///     .with_host("http://192.168.2.2")
///     .with_request_timeout(Duration::from_secs(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Scheme and authority of the vehicle, e.g. `http://192.168.2.2`
    pub host: String,
    /// Path of the video manager API below `host`
    pub api_path: String,
    /// Upper bound for every remote call
    pub request_timeout: Duration,
    /// Delay between two refreshes of the device and stream lists
    pub poll_interval: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            api_path: VIDEO_MANAGER_PATH.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl SyncConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_api_path(mut self, path: impl Into<String>) -> Self {
        self.api_path = path.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// A zero interval falls back to [`DEFAULT_POLL_INTERVAL`].
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = poll_interval_or_default(interval);
        self
    }

    /// Base URL of the video manager API, without a trailing slash.
    pub fn api_url(&self) -> String {
        let host = self.host.trim_end_matches('/');
        let path = self.api_path.trim_matches('/');
        if path.is_empty() {
            host.to_string()
        } else {
            format!("{}/{}", host, path)
        }
    }

    /// Create config from environment variables.
    ///
    /// - `VIDEO_SYNC_HOST` overrides the host
    /// - `VIDEO_SYNC_TIMEOUT_MS` overrides the request timeout
    /// - `VIDEO_SYNC_POLL_MS` overrides the poll interval
    ///
    /// Values that do not parse are ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("VIDEO_SYNC_HOST") {
            if !host.trim().is_empty() {
                config.host = host.trim().to_string();
            }
        }
        if let Some(timeout) = millis_from_env("VIDEO_SYNC_TIMEOUT_MS") {
            config.request_timeout = timeout;
        }
        if let Some(interval) = millis_from_env("VIDEO_SYNC_POLL_MS") {
            config.poll_interval = interval;
        }

        config
    }
}

/// `interval`, or [`DEFAULT_POLL_INTERVAL`] when it is zero.
pub(crate) fn poll_interval_or_default(interval: Duration) -> Duration {
    if interval.is_zero() {
        tracing::warn!(
            "Poll interval must be greater than zero, using {:?}",
            DEFAULT_POLL_INTERVAL
        );
        DEFAULT_POLL_INTERVAL
    } else {
        interval
    }
}

fn millis_from_env(name: &str) -> Option<Duration> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse::<u64>() {
        Ok(0) => {
            tracing::warn!("{} must be greater than zero, using default", name);
            None
        }
        Ok(ms) => Some(Duration::from_millis(ms)),
        Err(e) => {
            tracing::warn!("Ignoring {}={:?}: {}", name, raw, e);
            None
        }
    }
}
