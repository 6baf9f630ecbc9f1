//! Realtime database client for user profiles.

use crate::client::extract_error;
use crate::error::IdentityError;
use async_trait::async_trait;
use registration::{Identity, Profile, ProfileStore, StoreError};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, instrument};

/// Writes profiles under `users/{uid}` in the realtime JSON database.
#[derive(Clone)]
pub struct ProfileDatabaseClient {
    client: Client,
    database_url: String,
}

impl ProfileDatabaseClient {
    pub fn new(database_url: impl Into<String>, timeout: Duration) -> Result<Self, IdentityError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            database_url: database_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn profile_url(&self, uid: &str) -> String {
        format!("{}/users/{}.json", self.database_url, urlencoding::encode(uid))
    }

    /// Replace the profile stored for `uid`.
    #[instrument(skip(self, token, profile))]
    pub async fn put_profile(
        &self,
        uid: &str,
        token: Option<&SecretString>,
        profile: &Profile,
    ) -> Result<(), IdentityError> {
        let mut request = self.client.put(self.profile_url(uid)).json(profile);
        if let Some(token) = token {
            request = request.query(&[("auth", token.expose_secret())]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(extract_error(response).await);
        }

        debug!("Profile written");
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for ProfileDatabaseClient {
    async fn save(&self, identity: &Identity, profile: &Profile) -> Result<(), StoreError> {
        self.put_profile(&identity.uid, identity.id_token.as_ref(), profile)
            .await
            .map_err(StoreError::from)
    }
}
