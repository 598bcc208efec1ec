//! Client-side session and identity state for web application frontends.
//!
//! `session-kit` owns the authenticated-or-not state of the current client:
//! the bearer token, the cached user profile, and the login / logout /
//! password-recovery / registration flows against a remote HTTP API. It is
//! a pure in-process state/action surface: no UI rendering, no routing
//! tables, no server side.
//!
//! ## Design
//! - Trait seams for every collaborator ([`AuthApi`], [`TokenStore`],
//!   [`NotificationSink`], [`Navigator`]), so the core logic runs unchanged
//!   against production implementations or test doubles
//! - Explicit dependency injection: stores are built from `Arc` handles and
//!   shared by cloning, never reached through a global
//! - Reference implementations included: a reqwest-backed API client, file
//!   and in-memory token stores, an insertion-ordered notification queue,
//!   and an in-memory navigator

pub mod api;
pub mod config;
pub mod nav;
pub mod notify;
pub mod session;
pub mod settings;
pub mod token;

pub use api::{
    ApiError, AppSettings, ApplicationSettings, AuthApi, AuthToken, HttpAuthApi, ProfileUpdate,
    Registration, Role, UserProfile,
};
pub use config::{ApiConfig, SessionConfig};
pub use nav::{MemoryNavigator, Navigator};
pub use notify::{Notification, NotificationHandle, NotificationQueue, NotificationSink, Severity};
pub use session::{SessionState, SessionStore};
pub use settings::SettingsStore;
pub use token::{FileTokenStore, MemoryTokenStore, TokenStore};
