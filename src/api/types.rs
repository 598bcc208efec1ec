//! Wire types shared between the session stores and the backend API.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ── Roles ────────────────────────────────────────────────────────

/// A role granted to a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Full administrative access.
    Admin,
    /// Can create and manage projects.
    Creator,
    /// Can run and inspect tests.
    Tester,
}

// ── Identity ─────────────────────────────────────────────────────

/// Identity record for a user account, as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Server-side identifier.
    #[serde(default)]
    pub id: Option<String>,
    /// Login name.
    #[serde(default)]
    pub username: String,
    /// Optional display name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Contact email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Roles granted to the account.
    #[serde(default)]
    pub roles: HashSet<Role>,
    /// Whether the account is active.
    #[serde(default)]
    pub enabled: bool,
}

impl UserProfile {
    /// Whether the account holds the given role.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

// ── Application settings ─────────────────────────────────────────

/// Instance-level application settings. Opaque to the session store, which
/// only forwards this payload to the settings store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// Backend version string.
    #[serde(default)]
    pub version: String,
    /// Subscription plan code, if the deployment has one.
    #[serde(default)]
    pub plan: Option<String>,
    /// Stable identifier of this backend instance.
    #[serde(default)]
    pub instance_id: Option<String>,
    /// Externally reachable URL of the instance.
    #[serde(default)]
    pub external_url: Option<String>,
}

/// Combined user + application settings payload. Either half may be absent
/// (e.g. on instances that expose settings without a signed-in user).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSettings {
    /// Profile of the authenticated user.
    #[serde(default)]
    pub user: Option<UserProfile>,
    /// Instance-level settings.
    #[serde(default)]
    pub app: Option<AppSettings>,
}

// ── Request payloads ─────────────────────────────────────────────

/// Response of a successful credential exchange. The backend may answer
/// 200 without a token; callers treat that as a failed login.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthToken {
    /// Issued bearer token.
    #[serde(default)]
    pub id_token: Option<String>,
}

/// Partial profile patch for the signed-in user.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// New contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Payload for registering a new account.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// Desired login name.
    pub username: String,
    /// Contact email address.
    pub email: String,
    /// Initial password.
    pub password: String,
    /// Optional display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_screaming_case() {
        let role: Role = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn profile_tolerates_missing_fields() {
        let profile: UserProfile = serde_json::from_str(r#"{"username": "ada"}"#).unwrap();
        assert_eq!(profile.username, "ada");
        assert!(profile.roles.is_empty());
        assert!(!profile.enabled);
        assert!(!profile.has_role(Role::Admin));
    }

    #[test]
    fn settings_payload_halves_are_optional() {
        let settings: ApplicationSettings = serde_json::from_str("{}").unwrap();
        assert!(settings.user.is_none());
        assert!(settings.app.is_none());

        let settings: ApplicationSettings = serde_json::from_str(
            r#"{"user": {"username": "ada", "roles": ["ADMIN"], "enabled": true},
                "app": {"version": "1.4.0"}}"#,
        )
        .unwrap();
        assert!(settings.user.unwrap().has_role(Role::Admin));
        assert_eq!(settings.app.unwrap().version, "1.4.0");
    }

    #[test]
    fn auth_token_may_be_absent() {
        let auth: AuthToken = serde_json::from_str("{}").unwrap();
        assert!(auth.id_token.is_none());

        let auth: AuthToken = serde_json::from_str(r#"{"idToken": "jwt-1"}"#).unwrap();
        assert_eq!(auth.id_token.as_deref(), Some("jwt-1"));
    }
}
