//! Capabilities the submission workflow depends on.
//!
//! Each is injected into the controller as an `Arc<dyn Trait>` and owned by
//! the caller.

use crate::error::{AuthError, StoreError};
use crate::types::{Identity, Profile};
use async_trait::async_trait;
use secrecy::SecretString;

/// Account-creation service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account for the given credentials.
    async fn create_account(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Identity, AuthError>;
}

/// Profile persistence keyed by the new identity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn save(&self, identity: &Identity, profile: &Profile) -> Result<(), StoreError>;
}

/// User-facing notification sink. Fire-and-forget.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Route navigation. Fire-and-forget.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    fn go_to(&self, path: &str);
}
