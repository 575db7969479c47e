//! Notification sink abstraction.
//!
//! Actions never raise remote failures to their caller; they hand a
//! [`LiveNotification`] to whatever sink was injected at construction.

use crate::notifications::LiveNotification;

/// Receiver of user-facing notifications.
///
/// Pushing must not fail and must not block: the caller is in the middle of
/// resolving an action.
pub trait NotificationSink: Send + Sync {
    fn push_notification(&self, notification: LiveNotification);
}
