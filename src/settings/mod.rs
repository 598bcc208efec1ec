//! Instance settings store, the session store's sibling.
//!
//! Caches the application-level settings payload decoded by the combined
//! settings fetch, and owns the generic API-error check shared by account
//! mutations: surface the failure as an error notification and tell the
//! caller whether the session credentials are no longer valid.

use crate::api::{ApiError, AppSettings};
use crate::notify::{Notification, NotificationSink};
use parking_lot::RwLock;
use std::sync::Arc;

/// Sibling store holding instance-level application settings.
pub struct SettingsStore {
    notifications: Arc<dyn NotificationSink>,
    /// Whether an auth gate is configured for this deployment.
    auth_available: bool,
    app: RwLock<Option<AppSettings>>,
}

impl SettingsStore {
    pub fn new(notifications: Arc<dyn NotificationSink>, auth_available: bool) -> Self {
        Self {
            notifications,
            auth_available,
            app: RwLock::new(None),
        }
    }

    /// Whether an auth gate is configured.
    pub fn auth_available(&self) -> bool {
        self.auth_available
    }

    /// Replace the cached application settings.
    pub fn set_app_settings(&self, app: AppSettings) {
        tracing::debug!(version = %app.version, "Application settings updated");
        *self.app.write() = Some(app);
    }

    /// Snapshot of the cached application settings.
    pub fn app_settings(&self) -> Option<AppSettings> {
        self.app.read().clone()
    }

    /// Generic API-error check shared by account mutations.
    ///
    /// Surfaces the failure as an error notification. Returns `true` when
    /// the backend no longer accepts the session credentials (HTTP 401) and
    /// the caller should drop the login.
    pub fn check_api_error(&self, err: &ApiError) -> bool {
        self.notifications.push(Notification::error(err.display_message()));

        if err.is_unauthorized() {
            tracing::warn!("API call rejected as unauthorized; session is no longer valid");
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ErrorBody;
    use crate::notify::{NotificationQueue, Severity};

    fn store() -> (Arc<NotificationQueue>, SettingsStore) {
        let queue = Arc::new(NotificationQueue::new());
        let store = SettingsStore::new(queue.clone(), true);
        (queue, store)
    }

    fn rejected(status: u16, detail: &str) -> ApiError {
        ApiError::Rejected {
            status,
            body: ErrorBody {
                message: None,
                detail: Some(detail.into()),
                field_errors: Vec::new(),
            },
        }
    }

    #[test]
    fn app_settings_cache_roundtrip() {
        let (_, store) = store();
        assert!(store.app_settings().is_none());

        store.set_app_settings(AppSettings {
            version: "1.4.0".into(),
            plan: None,
            instance_id: None,
            external_url: None,
        });
        assert_eq!(store.app_settings().unwrap().version, "1.4.0");
    }

    #[test]
    fn unauthorized_error_drops_session_and_notifies() {
        let (queue, store) = store();
        let drop_session = store.check_api_error(&rejected(401, "Session expired"));

        assert!(drop_session);
        let queued = queue.snapshot();
        assert_eq!(queued.len(), 1);
        assert_eq!(queued[0].content, "Session expired");
        assert_eq!(queued[0].color, Some(Severity::Error));
    }

    #[test]
    fn other_errors_notify_without_dropping_session() {
        let (queue, store) = store();
        let drop_session = store.check_api_error(&rejected(500, "boom"));

        assert!(!drop_session);
        assert_eq!(queue.snapshot()[0].content, "boom");
    }
}
