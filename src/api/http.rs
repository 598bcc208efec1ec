//! reqwest-backed implementation of [`AuthApi`].
//!
//! Hand-rolled typed client over the backend's REST surface:
//! - Bearer token attached from the injected token store when one is present
//! - Non-2xx responses decoded into [`ErrorBody`]; an undecodable body gets
//!   a detail synthesized from the HTTP status
//! - Connect/timeout/decode failures map to [`ApiError::Transport`]

use super::error::{ApiError, ErrorBody};
use super::types::{
    ApplicationSettings, AuthToken, ProfileUpdate, Registration, UserProfile,
};
use super::AuthApi;
use crate::config::ApiConfig;
use crate::token::TokenStore;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// HTTP client for the backend authentication and account endpoints.
pub struct HttpAuthApi {
    config: ApiConfig,
    http: reqwest::Client,
    tokens: Arc<dyn TokenStore>,
}

impl HttpAuthApi {
    /// Create a client for the configured backend.
    pub fn new(config: ApiConfig, tokens: Arc<dyn TokenStore>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            config,
            http,
            tokens,
        })
    }

    /// Build the full URL for an API path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Attach the bearer token when one is stored.
    fn with_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.tokens.load() {
            Some(token) if !token.is_empty() => request.bearer_auth(token),
            _ => request,
        }
    }

    /// Pass successful responses through; decode the error payload on
    /// rejection.
    async fn checked(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response.json::<ErrorBody>().await.unwrap_or_else(|_| ErrorBody {
            detail: Some(format!("request rejected with status {status}")),
            ..ErrorBody::default()
        });
        Err(ApiError::Rejected { status, body })
    }
}

fn transport(err: reqwest::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn authorize(&self, username: &str, password: &str) -> Result<AuthToken, ApiError> {
        // Credential exchange: no bearer header on this request.
        let response = self
            .http
            .post(self.url("/api/authenticate"))
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .map_err(transport)?;

        Self::checked(response).await?.json().await.map_err(transport)
    }

    async fn application_settings(&self) -> Result<ApplicationSettings, ApiError> {
        let response = self
            .with_auth(self.http.get(self.url("/api/settings")))
            .send()
            .await
            .map_err(transport)?;

        Self::checked(response).await?.json().await.map_err(transport)
    }

    async fn save_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, ApiError> {
        let response = self
            .with_auth(self.http.post(self.url("/api/account")))
            .json(update)
            .send()
            .await
            .map_err(transport)?;

        Self::checked(response).await?.json().await.map_err(transport)
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/api/account/reset-password/init"))
            .json(&serde_json::json!({ "email": email }))
            .send()
            .await
            .map_err(transport)?;

        Self::checked(response).await?;
        Ok(())
    }

    async fn finish_password_reset(
        &self,
        reset_token: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/api/account/reset-password/finish"))
            .json(&serde_json::json!({ "token": reset_token, "newPassword": new_password }))
            .send()
            .await
            .map_err(transport)?;

        Self::checked(response).await?;
        Ok(())
    }

    async fn register_account(&self, registration: &Registration) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/api/register"))
            .json(registration)
            .send()
            .await
            .map_err(transport)?;

        Self::checked(response).await?;
        Ok(())
    }
}
