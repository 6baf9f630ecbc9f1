//! Identity client errors.

use registration::{AuthError, StoreError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Rate limit exceeded")]
    RateLimit,

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

impl IdentityError {
    /// Identity SDK error code for this failure.
    ///
    /// The REST API reports bare reasons such as `EMAIL_EXISTS` or
    /// `WEAK_PASSWORD : Password should be at least 6 characters`; callers
    /// classify on the `auth/...` vocabulary instead.
    pub fn auth_code(&self) -> &'static str {
        match self {
            IdentityError::Http(_) => "auth/network-request-failed",
            IdentityError::Json(_) => "auth/internal-error",
            IdentityError::RateLimit => "auth/too-many-requests",
            IdentityError::Api { message, .. } => {
                let reason = message
                    .split(|c: char| c == ' ' || c == ':')
                    .next()
                    .unwrap_or_default();
                match reason {
                    "EMAIL_EXISTS" => "auth/email-already-in-use",
                    "WEAK_PASSWORD" => "auth/weak-password",
                    "INVALID_EMAIL" => "auth/invalid-email",
                    "MISSING_PASSWORD" => "auth/missing-password",
                    "OPERATION_NOT_ALLOWED" => "auth/operation-not-allowed",
                    "TOO_MANY_ATTEMPTS_TRY_LATER" => "auth/too-many-requests",
                    "INVALID_API_KEY" | "API" => "auth/api-key-not-valid",
                    _ => "auth/internal-error",
                }
            }
        }
    }
}

impl From<IdentityError> for AuthError {
    fn from(e: IdentityError) -> Self {
        AuthError::new(e.auth_code(), e.to_string())
    }
}

impl From<IdentityError> for StoreError {
    fn from(e: IdentityError) -> Self {
        match e {
            IdentityError::Json(e) => StoreError::Serialization(e),
            IdentityError::Api { status, message } if status == 401 || status == 403 => {
                StoreError::Rejected(message)
            }
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}
