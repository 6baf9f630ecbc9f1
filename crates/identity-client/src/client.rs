//! Identity toolkit HTTP client.

use crate::error::IdentityError;
use crate::types::*;
use async_trait::async_trait;
use registration::{AuthError, AuthService, Identity};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Account creation against the hosted identity toolkit.
///
/// The API key is stored using `SecretString` to prevent accidental
/// exposure in logs or debug output.
#[derive(Clone)]
pub struct IdentityClient {
    client: Client,
    auth_url: String,
    api_key: SecretString,
}

impl IdentityClient {
    /// Create a new identity client.
    pub fn new(
        api_key: impl Into<String>,
        auth_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, IdentityError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            auth_url: auth_url.into().trim_end_matches('/').to_string(),
            api_key: SecretString::new(api_key.into()),
        })
    }

    /// Create an email/password account.
    #[instrument(skip(self, password))]
    pub async fn sign_up(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<SignUpResponse, IdentityError> {
        let request = SignUpRequest {
            email,
            password: password.expose_secret(),
            return_secure_token: true,
        };

        let response = self
            .client
            .post(format!("{}/v1/accounts:signUp", self.auth_url))
            .query(&[("key", self.api_key.expose_secret())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let body = response.text().await?;
            let created: SignUpResponse = serde_json::from_str(&body)?;
            debug!(uid = %created.local_id, "Account created");
            Ok(created)
        } else {
            Err(extract_error(response).await)
        }
    }
}

#[async_trait]
impl AuthService for IdentityClient {
    async fn create_account(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Identity, AuthError> {
        let created = self.sign_up(email, password).await?;

        Ok(Identity {
            uid: created.local_id,
            email: created.email,
            id_token: created.id_token,
        })
    }
}

/// Extract error information from a failed response.
pub(crate) async fn extract_error(response: reqwest::Response) -> IdentityError {
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        warn!("Rate limit exceeded");
        return IdentityError::RateLimit;
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".into());

    let message = match serde_json::from_str::<ApiErrorBody>(&body) {
        Ok(parsed) => {
            debug!(code = parsed.error.code, "Service error body");
            parsed.error.message
        }
        Err(_) => body,
    };

    IdentityError::Api {
        status: status.as_u16(),
        message,
    }
}
