//! User-facing notifications.
//!
//! Failed remote calls are reported here instead of being returned to the
//! caller. [`failure_notification`] is the only place that turns a
//! [`RemoteCallError`] into a [`LiveNotification`]; every action goes
//! through it so codes, wording and severity stay uniform.
//!
//! [`NotificationStore`] is an in-memory [`NotificationSink`] that keeps
//! what was pushed, mirrors it to `tracing`, and broadcasts it to
//! subscribers.

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::error::RemoteCallError;
use crate::traits::NotificationSink;

/// Service tag attached to every notification this crate emits.
pub const VIDEO_MANAGER_SERVICE: &str = "video-manager";

const BROADCAST_CAPACITY: usize = 64;

/// Most notifications a [`NotificationStore`] keeps; older ones are dropped.
pub const MAX_RETAINED: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Error,
    Critical,
}

/// A structured notification for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveNotification {
    pub id: Uuid,
    pub level: NotificationLevel,
    /// Originating service
    pub service: String,
    /// Short machine-readable code, e.g. `VIDEO_STREAM_DELETE_FAIL`
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub time_created: DateTime<Utc>,
}

impl LiveNotification {
    pub fn new(
        level: NotificationLevel,
        service: impl Into<String>,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            service: service.into(),
            kind: kind.into(),
            message: message.into(),
            time_created: Utc::now(),
        }
    }
}

/// The store actions that can fail, one failure code each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailedAction {
    DeleteStream,
    CreateStream,
    FetchStreams,
    FetchDevices,
}

impl FailedAction {
    pub fn code(&self) -> &'static str {
        match self {
            FailedAction::DeleteStream => "VIDEO_STREAM_DELETE_FAIL",
            FailedAction::CreateStream => "VIDEO_STREAM_CREATION_FAIL",
            FailedAction::FetchStreams => "VIDEO_STREAMS_FETCH_FAIL",
            FailedAction::FetchDevices => "VIDEO_DEVICES_FETCH_FAIL",
        }
    }

    fn summary(&self) -> &'static str {
        match self {
            FailedAction::DeleteStream => "Could not delete video stream",
            FailedAction::CreateStream => "Could not create video stream",
            FailedAction::FetchStreams => "Could not fetch video streams",
            FailedAction::FetchDevices => "Could not fetch video devices",
        }
    }
}

/// Build the notification reported when `action` fails with `err`.
pub fn failure_notification(action: FailedAction, err: &RemoteCallError) -> LiveNotification {
    LiveNotification::new(
        NotificationLevel::Error,
        VIDEO_MANAGER_SERVICE,
        action.code(),
        format!("{}: {}.", action.summary(), err),
    )
}

/// In-memory notification sink.
///
/// Keeps the last [`MAX_RETAINED`] notifications.
pub struct NotificationStore {
    notifications: Mutex<VecDeque<LiveNotification>>,
    sender: broadcast::Sender<LiveNotification>,
}

impl NotificationStore {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            notifications: Mutex::new(VecDeque::new()),
            sender,
        }
    }

    /// Retained notifications, oldest first.
    pub fn notifications(&self) -> Vec<LiveNotification> {
        self.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Notifications carrying the given code.
    pub fn with_kind(&self, kind: &str) -> Vec<LiveNotification> {
        self.lock()
            .iter()
            .filter(|n| n.kind == kind)
            .cloned()
            .collect()
    }

    /// Remove and return the retained notifications.
    pub fn drain(&self) -> Vec<LiveNotification> {
        self.lock().drain(..).collect()
    }

    /// Receive notifications pushed after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<LiveNotification> {
        self.sender.subscribe()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<LiveNotification>> {
        self.notifications
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for NotificationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationSink for NotificationStore {
    fn push_notification(&self, notification: LiveNotification) {
        match notification.level {
            NotificationLevel::Error | NotificationLevel::Critical => tracing::error!(
                service = %notification.service,
                kind = %notification.kind,
                "{}",
                notification.message
            ),
            NotificationLevel::Warning => tracing::warn!(
                service = %notification.service,
                kind = %notification.kind,
                "{}",
                notification.message
            ),
            _ => tracing::info!(
                service = %notification.service,
                kind = %notification.kind,
                "{}",
                notification.message
            ),
        }

        {
            let mut retained = self.lock();
            if retained.len() == MAX_RETAINED {
                retained.pop_front();
            }
            retained.push_back(notification.clone());
        }
        // No subscribers is fine
        let _ = self.sender.send(notification);
    }
}
