//! Session lifecycle store.
//!
//! Owns the authenticated-or-not state machine for the current client:
//! login, the logout variants, startup reconciliation, profile updates, and
//! the password recovery / reset / registration flows. All remote work goes
//! through the [`AuthApi`] seam; navigation, notifications, and token
//! persistence are injected the same way, so the store runs unchanged
//! against a real router or a test double.
//!
//! Error discipline is per-action: `login` and `password_recovery` swallow
//! API failures into state and notifications, `update_user_profile` and
//! `signup_user` re-raise the server detail, `check_logged_in` and
//! `reset_password` let failures propagate to the caller.

use crate::api::{ApiError, AuthApi, ProfileUpdate, Registration, Role, UserProfile};
use crate::config::SessionConfig;
use crate::nav::Navigator;
use crate::notify::{Notification, NotificationSink};
use crate::settings::SettingsStore;
use crate::token::TokenStore;
use anyhow::Result;
use parking_lot::RwLock;
use std::sync::Arc;

/// Mutable session state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// Bearer credential; empty means "no token".
    pub token: String,
    /// `None` until the first login attempt or reconciliation resolves it.
    pub logged_in: Option<bool>,
    /// Last login failure, cleared by the next successful login.
    pub login_error: Option<String>,
    /// Cached identity record. Deliberately retained across `remove_login`
    /// so a re-login starts from the previous profile.
    pub user_profile: Option<UserProfile>,
}

/// Client-side session store. Construct one per UI context and share it via
/// `Arc`; there is no global instance.
pub struct SessionStore {
    api: Arc<dyn AuthApi>,
    tokens: Arc<dyn TokenStore>,
    notifications: Arc<dyn NotificationSink>,
    navigator: Arc<dyn Navigator>,
    settings: Arc<SettingsStore>,
    config: SessionConfig,
    state: RwLock<SessionState>,
}

impl SessionStore {
    pub fn new(
        api: Arc<dyn AuthApi>,
        tokens: Arc<dyn TokenStore>,
        notifications: Arc<dyn NotificationSink>,
        navigator: Arc<dyn Navigator>,
        settings: Arc<SettingsStore>,
        config: SessionConfig,
    ) -> Self {
        Self {
            api,
            tokens,
            notifications,
            navigator,
            settings,
            config,
            state: RwLock::new(SessionState::default()),
        }
    }

    // ── State accessors ──────────────────────────────────────

    /// Snapshot of the current session state.
    pub fn state(&self) -> SessionState {
        self.state.read().clone()
    }

    /// Whether the session is known to be authenticated.
    pub fn is_logged_in(&self) -> bool {
        self.state.read().logged_in == Some(true)
    }

    /// Current in-memory bearer token (empty when signed out).
    pub fn token(&self) -> String {
        self.state.read().token.clone()
    }

    /// Whether the cached profile grants administrative access: the account
    /// must be enabled and hold the admin role. False with no cached profile.
    pub fn has_admin_access(&self) -> bool {
        let state = self.state.read();
        state
            .user_profile
            .as_ref()
            .is_some_and(|p| p.enabled && p.has_role(Role::Admin))
    }

    // ── Login / logout ───────────────────────────────────────

    /// Exchange credentials for a session.
    ///
    /// Failures never propagate: a rejected login (or a token-less 200)
    /// records the server detail in `login_error` and tears the session
    /// down. On success the token is persisted, the combined user + app
    /// settings are fetched, and navigation lands on the home route when
    /// the login or root route is showing.
    pub async fn login(&self, username: &str, password: &str) {
        match self.api.authorize(username, password).await {
            Ok(auth) => match auth.id_token {
                Some(token) if !token.is_empty() => {
                    self.tokens.save(&token);
                    {
                        let mut state = self.state.write();
                        state.token = token;
                        state.logged_in = Some(true);
                        state.login_error = None;
                    }
                    tracing::info!(username, "Login succeeded");

                    // A failed settings fetch here behaves like a failed login.
                    if let Err(err) = self.fetch_user_and_app_settings().await {
                        self.state.write().login_error = Some(err.detail());
                        self.logout();
                        return;
                    }

                    self.route_logged_in();
                    self.notifications.push(Notification::success("Logged in"));
                }
                _ => {
                    tracing::warn!(username, "Authorize answered without a token");
                    self.logout();
                }
            },
            Err(err) => {
                let detail = err.detail();
                tracing::warn!(username, error = %detail, "Login failed");
                self.state.write().login_error = Some(detail);
                self.logout();
            }
        }
    }

    /// Clear the persisted and in-memory credential. Idempotent; leaves the
    /// cached profile and the last login error in place.
    pub fn remove_login(&self) {
        self.tokens.clear();
        let mut state = self.state.write();
        state.token = String::new();
        state.logged_in = Some(false);
    }

    /// Tear the session down and return to the login route.
    pub fn logout(&self) {
        self.remove_login();
        self.route_logout();
    }

    /// User-initiated logout: same teardown plus a farewell notification.
    /// The internal failure paths use [`SessionStore::logout`] and stay
    /// silent.
    pub fn user_logout(&self) {
        self.logout();
        self.notifications.push(Notification::success("Logged out"));
    }

    // ── Startup reconciliation ───────────────────────────────

    /// Reconcile the session with the stored token. Idempotent; called at
    /// application startup and from navigation guards.
    ///
    /// Fetch failures propagate to the caller.
    pub async fn check_logged_in(&self) -> Result<()> {
        if self.settings.auth_available() {
            if self.is_logged_in() {
                return Ok(());
            }

            let token = {
                let mut state = self.state.write();
                if state.token.is_empty() {
                    state.token = self.tokens.load().unwrap_or_default();
                }
                state.token.clone()
            };

            if token.is_empty() {
                self.remove_login();
            } else {
                self.fetch_user_and_app_settings().await?;
            }
        } else if !self.is_logged_in() {
            // Auth-optional deployments still populate profile and settings.
            self.fetch_user_and_app_settings().await?;
        }

        Ok(())
    }

    /// Combined user + app settings fetch shared by `login` and
    /// `check_logged_in`: marks the session live, and caches both payloads
    /// when the response carries both.
    async fn fetch_user_and_app_settings(&self) -> std::result::Result<(), ApiError> {
        let response = self.api.application_settings().await?;

        self.state.write().logged_in = Some(true);
        if let (Some(user), Some(app)) = (response.user, response.app) {
            tracing::debug!(username = %user.username, "Cached user profile");
            self.state.write().user_profile = Some(user);
            self.settings.set_app_settings(app);
        }

        Ok(())
    }

    // ── Profile ──────────────────────────────────────────────

    /// Persist profile changes and refresh the cached profile.
    ///
    /// Re-raises the server detail on failure, after the sibling store's
    /// generic error check (which drops the session on a 401). The progress
    /// notification stays queued on the failure path.
    pub async fn update_user_profile(&self, update: &ProfileUpdate) -> Result<()> {
        let saving = self.notifications.push(Notification::progress("Saving"));

        match self.api.save_profile(update).await {
            Ok(profile) => {
                self.state.write().user_profile = Some(profile);
                self.notifications.dismiss(saving);
                self.notifications
                    .push(Notification::success("Profile successfully updated"));
                Ok(())
            }
            Err(err) => {
                if self.settings.check_api_error(&err) {
                    self.logout();
                }
                Err(anyhow::anyhow!(err.detail()))
            }
        }
    }

    // ── Password flows ───────────────────────────────────────

    /// Request a password-recovery email. Failures surface as an error
    /// notification (validation-aware formatting) and are never raised.
    pub async fn password_recovery(&self, email: &str) {
        let sending = self
            .notifications
            .push(Notification::progress("Sending password recovery email"));

        match self.api.request_password_reset(email).await {
            Ok(()) => {
                self.notifications.dismiss(sending);
                self.notifications
                    .push(Notification::success("Password recovery link has been sent"));
                self.logout();
            }
            Err(err) => {
                self.notifications.dismiss(sending);
                self.notifications
                    .push(Notification::error(err.display_message()));
            }
        }
    }

    /// Complete a password reset with the token from the recovery email.
    ///
    /// Failures propagate to the caller; the progress notification stays
    /// queued on that path.
    pub async fn reset_password(&self, new_password: &str, reset_token: &str) -> Result<()> {
        let resetting = self
            .notifications
            .push(Notification::progress("Resetting password"));

        self.api.finish_password_reset(reset_token, new_password).await?;

        self.notifications.dismiss(resetting);
        self.notifications
            .push(Notification::success("Password successfully changed"));
        self.logout();
        Ok(())
    }

    // ── Registration ─────────────────────────────────────────

    /// Register a new account, then drop to the login route for the first
    /// sign-in.
    ///
    /// Re-raises the server detail on failure; the progress notification
    /// stays queued on that path.
    pub async fn signup_user(&self, registration: &Registration) -> Result<()> {
        let saving = self.notifications.push(Notification::progress("Saving"));

        match self.api.register_account(registration).await {
            Ok(()) => {
                self.notifications.dismiss(saving);
                self.notifications
                    .push(Notification::success("Success! Please proceed to login"));
                self.logout();
                Ok(())
            }
            Err(err) => Err(anyhow::anyhow!(err.detail())),
        }
    }

    // ── Routing ──────────────────────────────────────────────

    /// After login: land on the home route, but only when coming from the
    /// login or root route. Deep links stay put.
    fn route_logged_in(&self) {
        let current = self.navigator.current_path();
        if current == self.config.login_path || current == self.config.root_path {
            self.navigator.navigate(&self.config.home_path);
        }
    }

    /// After logout: return to the login route unless already there.
    fn route_logout(&self) {
        if self.navigator.current_path() != self.config.login_path {
            self.navigator.navigate(&self.config.login_path);
        }
    }
}
