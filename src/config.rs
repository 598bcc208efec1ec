//! Configuration for the session layer.

use serde::{Deserialize, Serialize};

/// Default backend base URL for local development.
const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Route configuration for the session store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Path of the login view.
    pub login_path: String,
    /// Root path of the application.
    pub root_path: String,
    /// Landing route after a successful login.
    pub home_path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            login_path: "/auth/login".into(),
            root_path: "/".into(),
            home_path: "/main".into(),
        }
    }
}

/// Backend connection configuration for the HTTP API client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend base URL (e.g., http://127.0.0.1:8080).
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    /// Load from environment variables. Returns `None` when no backend URL
    /// is configured.
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("SESSION_API_URL").ok()?;
        if base_url.is_empty() {
            return None;
        }

        let timeout_secs = std::env::var("SESSION_API_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Some(Self {
            base_url,
            timeout_secs,
        })
    }
}
