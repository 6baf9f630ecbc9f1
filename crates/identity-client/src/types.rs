//! Request and response types for the identity toolkit and profile database.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Body of `accounts:signUp`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SignUpRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub return_secure_token: bool,
}

/// Successful `accounts:signUp` response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpResponse {
    /// Provider-assigned user id.
    pub local_id: String,
    pub email: String,
    #[serde(default)]
    pub id_token: Option<SecretString>,
}

/// Error envelope returned by the identity toolkit.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorDetail {
    #[serde(default)]
    pub code: u16,
    pub message: String,
}
