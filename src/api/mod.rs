//! Backend API seam: the [`AuthApi`] trait, its wire types, and the reqwest
//! implementation.
//!
//! ## Design
//! - `AuthApi` is object-safe and `Send + Sync`, so the stores hold
//!   `Arc<dyn AuthApi>` and tests inject scripted implementations
//! - [`HttpAuthApi`] is the production implementation over the backend's
//!   REST surface
//! - Every operation returns `Result<_, ApiError>`; server error payloads
//!   are decoded into the taxonomy in [`error`]

pub mod error;
pub mod http;
pub mod types;

use async_trait::async_trait;

pub use error::{ApiError, ErrorBody, FieldError, VALIDATION_MESSAGE};
pub use http::HttpAuthApi;
pub use types::{
    AppSettings, ApplicationSettings, AuthToken, ProfileUpdate, Registration, Role, UserProfile,
};

/// Remote authentication and identity operations consumed by the session
/// stores.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a bearer token.
    async fn authorize(&self, username: &str, password: &str) -> Result<AuthToken, ApiError>;

    /// Fetch the combined user + application settings payload.
    async fn application_settings(&self) -> Result<ApplicationSettings, ApiError>;

    /// Persist profile changes; returns the updated profile.
    async fn save_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, ApiError>;

    /// Start the password-recovery flow for the given email address.
    async fn request_password_reset(&self, email: &str) -> Result<(), ApiError>;

    /// Complete a password reset using the token from the recovery email.
    async fn finish_password_reset(
        &self,
        reset_token: &str,
        new_password: &str,
    ) -> Result<(), ApiError>;

    /// Register a new account.
    async fn register_account(&self, registration: &Registration) -> Result<(), ApiError>;
}
