//! Registration error types.

use crate::types::FieldName;
use thiserror::Error;

/// Per-field validation failure. At most one is reported per field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(FieldName),

    #[error("{field} must be at most {max} characters")]
    TooLong { field: FieldName, max: usize },

    #[error("password too short (at least {min} characters)")]
    PasswordTooShort { min: usize },

    #[error("invalid email address")]
    InvalidEmail,

    #[error("passwords do not match")]
    PasswordMismatch,
}

impl ValidationError {
    /// Field the error belongs to.
    pub fn field(&self) -> FieldName {
        match self {
            ValidationError::Required(field) => *field,
            ValidationError::TooLong { field, .. } => *field,
            ValidationError::PasswordTooShort { .. } => FieldName::Password,
            ValidationError::InvalidEmail => FieldName::Email,
            ValidationError::PasswordMismatch => FieldName::ConfirmPassword,
        }
    }
}

/// Failure reported by the account-creation service.
///
/// `code` uses the identity SDK's `auth/...` vocabulary; `message` is
/// operator diagnostics and is never shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct AuthError {
    pub code: String,
    pub message: String,
}

impl AuthError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Failure reported by the profile store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Profile store unavailable: {0}")]
    Unavailable(String),

    #[error("Profile write rejected: {0}")]
    Rejected(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
