//! Error taxonomy for the backend API seam.
//!
//! Three failure shapes reach callers:
//! - Auth failures: the server rejected credentials (or issued no token),
//!   surfaced through the `detail` string and a 401 status
//! - Validation failures: `message == "error.validation"` with per-field
//!   errors, formatted one `field: message` per line
//! - Generic failures: an arbitrary `detail` string, surfaced verbatim

use serde::Deserialize;
use thiserror::Error;

/// Marker message the backend uses for structured validation failures.
pub const VALIDATION_MESSAGE: &str = "error.validation";

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldError {
    /// Name of the offending field.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

/// Error payload returned by the backend on a rejected request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Machine-readable error key (e.g. `error.validation`).
    #[serde(default)]
    pub message: Option<String>,
    /// Human-readable detail string.
    #[serde(default)]
    pub detail: Option<String>,
    /// Per-field failures accompanying a validation error.
    #[serde(default)]
    pub field_errors: Vec<FieldError>,
}

impl ErrorBody {
    /// Whether this is a structured validation failure.
    pub fn is_validation(&self) -> bool {
        self.message.as_deref() == Some(VALIDATION_MESSAGE)
    }

    /// Message for user-facing surfaces: validation failures are joined one
    /// `field: message` per line, anything else uses the detail string.
    pub fn display_message(&self) -> String {
        if self.is_validation() {
            self.field_errors
                .iter()
                .map(|e| format!("{}: {}", e.field, e.message))
                .collect::<Vec<_>>()
                .join("\n")
        } else {
            self.detail.clone().unwrap_or_else(|| "request rejected".into())
        }
    }
}

/// Failure talking to the backend API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with an error status. The body is decoded when
    /// the server sent one; otherwise it carries a synthesized detail.
    #[error("{}", .body.display_message())]
    Rejected {
        /// HTTP status code of the rejection.
        status: u16,
        /// Decoded error payload.
        body: ErrorBody,
    },

    /// The request produced no server response (connect, timeout, or a body
    /// that could not be decoded as the expected type).
    #[error("request failed: {0}")]
    Transport(String),
}

impl ApiError {
    /// HTTP status of the rejection, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::Transport(_) => None,
        }
    }

    /// Whether the session credentials were rejected (HTTP 401).
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Server-provided detail string, or the transport failure text.
    pub fn detail(&self) -> String {
        match self {
            Self::Rejected { status, body } => body
                .detail
                .clone()
                .unwrap_or_else(|| format!("request rejected with status {status}")),
            Self::Transport(msg) => msg.clone(),
        }
    }

    /// User-facing message: validation-aware for rejections, the raw text
    /// for transport failures.
    pub fn display_message(&self) -> String {
        match self {
            Self::Rejected { body, .. } => body.display_message(),
            Self::Transport(msg) => msg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validation_error() -> ApiError {
        ApiError::Rejected {
            status: 400,
            body: ErrorBody {
                message: Some(VALIDATION_MESSAGE.into()),
                detail: Some("Validation failed".into()),
                field_errors: vec![
                    FieldError {
                        field: "email".into(),
                        message: "invalid".into(),
                    },
                    FieldError {
                        field: "password".into(),
                        message: "too short".into(),
                    },
                ],
            },
        }
    }

    #[test]
    fn validation_errors_join_per_field_lines() {
        assert_eq!(
            validation_error().display_message(),
            "email: invalid\npassword: too short"
        );
    }

    #[test]
    fn non_validation_errors_surface_detail() {
        let err = ApiError::Rejected {
            status: 400,
            body: ErrorBody {
                message: Some("error.http.400".into()),
                detail: Some("Incorrect password".into()),
                field_errors: Vec::new(),
            },
        };
        assert_eq!(err.display_message(), "Incorrect password");
        assert_eq!(err.detail(), "Incorrect password");
    }

    #[test]
    fn unauthorized_is_detected_by_status() {
        let err = ApiError::Rejected {
            status: 401,
            body: ErrorBody::default(),
        };
        assert!(err.is_unauthorized());
        assert!(!validation_error().is_unauthorized());

        let err = ApiError::Transport("connection refused".into());
        assert!(!err.is_unauthorized());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn missing_detail_synthesizes_from_status() {
        let err = ApiError::Rejected {
            status: 503,
            body: ErrorBody::default(),
        };
        assert_eq!(err.detail(), "request rejected with status 503");
    }

    #[test]
    fn error_body_decodes_camel_case_fields() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"message": "error.validation",
                "detail": "Validation failed",
                "fieldErrors": [{"field": "email", "message": "invalid"}]}"#,
        )
        .unwrap();
        assert!(body.is_validation());
        assert_eq!(body.field_errors.len(), 1);
        assert_eq!(body.display_message(), "email: invalid");
    }
}
