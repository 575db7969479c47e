//! Periodic refresh of the device and stream lists.
//!
//! Create and delete leave the stream flag raised; the updater's next
//! successful fetch replaces the list and clears it.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::config::poll_interval_or_default;
use crate::state::VideoStore;

/// Outcome of one refresh round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    pub streams_ok: bool,
    pub devices_ok: bool,
}

/// Drives `fetch_streams` and `fetch_devices` on a fixed interval.
pub struct VideoUpdater {
    store: Arc<VideoStore>,
    interval: Duration,
}

impl VideoUpdater {
    /// A zero `interval` falls back to the default poll interval.
    pub fn new(store: Arc<VideoStore>, interval: Duration) -> Self {
        Self {
            store,
            interval: poll_interval_or_default(interval),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Refresh both lists once, concurrently.
    pub async fn tick(&self) -> TickOutcome {
        let (streams_ok, devices_ok) =
            futures::join!(self.store.fetch_streams(), self.store.fetch_devices());
        tracing::debug!(streams_ok, devices_ok, "Video lists refreshed");
        TickOutcome {
            streams_ok,
            devices_ok,
        }
    }

    /// Start refreshing in the background: once right away, then every
    /// interval. Abort the returned handle to stop.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            tracing::info!(
                "Video updater started (interval: {:?}, api: {})",
                self.interval,
                self.store.api_url()
            );

            let mut interval = tokio::time::interval(self.interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                interval.tick().await;
                self.tick().await;
            }
        })
    }
}
