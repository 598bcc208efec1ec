//! Transient user-facing notifications.
//!
//! The stores enqueue messages with a severity level and the UI drains them.
//! A progress notification (`show_progress`) stays visible until the action
//! that pushed it dismisses it by handle.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Severity ─────────────────────────────────────────────────────

/// Severity level of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// An action completed.
    Success,
    /// Neutral information.
    Info,
    /// Something degraded but the action went through.
    Warning,
    /// An action failed.
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

// ── Notification ─────────────────────────────────────────────────

/// A transient user-facing message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Message shown to the user.
    pub content: String,
    /// Severity for styling; `None` renders neutral.
    #[serde(default)]
    pub color: Option<Severity>,
    /// Show an indeterminate progress indicator until dismissed.
    #[serde(default)]
    pub show_progress: bool,
}

impl Notification {
    /// Neutral notification with an indeterminate progress indicator.
    pub fn progress(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            color: None,
            show_progress: true,
        }
    }

    /// Success notification.
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            color: Some(Severity::Success),
            show_progress: false,
        }
    }

    /// Error notification.
    pub fn error(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            color: Some(Severity::Error),
            show_progress: false,
        }
    }
}

/// Opaque handle identifying a queued notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationHandle(Uuid);

/// Append/remove seam the stores talk to.
pub trait NotificationSink: Send + Sync {
    /// Enqueue a notification; the returned handle removes it later.
    fn push(&self, notification: Notification) -> NotificationHandle;

    /// Remove a queued notification. Unknown handles are ignored.
    fn dismiss(&self, handle: NotificationHandle);
}

// ── Queue implementation ─────────────────────────────────────────

/// Insertion-ordered in-memory notification queue.
#[derive(Default)]
pub struct NotificationQueue {
    entries: Mutex<Vec<(NotificationHandle, Notification)>>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Oldest queued notification, if any.
    pub fn current(&self) -> Option<Notification> {
        self.entries.lock().first().map(|(_, n)| n.clone())
    }

    /// Remove and return the oldest queued notification.
    pub fn pop(&self) -> Option<Notification> {
        let mut entries = self.entries.lock();
        if entries.is_empty() {
            None
        } else {
            Some(entries.remove(0).1)
        }
    }

    /// Snapshot of the queue in insertion order.
    pub fn snapshot(&self) -> Vec<Notification> {
        self.entries.lock().iter().map(|(_, n)| n.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl NotificationSink for NotificationQueue {
    fn push(&self, notification: Notification) -> NotificationHandle {
        let handle = NotificationHandle(Uuid::new_v4());
        self.entries.lock().push((handle, notification));
        handle
    }

    fn dismiss(&self, handle: NotificationHandle) {
        self.entries.lock().retain(|(h, _)| *h != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_preserves_insertion_order() {
        let queue = NotificationQueue::new();
        queue.push(Notification::success("first"));
        queue.push(Notification::error("second"));

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.current().unwrap().content, "first");
        assert_eq!(queue.pop().unwrap().content, "first");
        assert_eq!(queue.pop().unwrap().content, "second");
        assert!(queue.is_empty());
    }

    #[test]
    fn dismiss_removes_only_the_addressed_entry() {
        let queue = NotificationQueue::new();
        let progress = queue.push(Notification::progress("saving"));
        queue.push(Notification::success("saved"));

        queue.dismiss(progress);
        let remaining = queue.snapshot();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].content, "saved");
    }

    #[test]
    fn dismiss_unknown_handle_is_a_noop() {
        let queue = NotificationQueue::new();
        let handle = queue.push(Notification::success("kept"));
        queue.dismiss(handle);
        queue.dismiss(handle);
        assert!(queue.is_empty());
    }

    #[test]
    fn progress_notifications_flag_the_indicator() {
        let n = Notification::progress("Sending password recovery email");
        assert!(n.show_progress);
        assert!(n.color.is_none());

        let n = Notification::success("done");
        assert!(!n.show_progress);
        assert_eq!(n.color, Some(Severity::Success));
    }
}
