//! HTTP adapters for account creation and profile storage.
//!
//! `IdentityClient` speaks the identity toolkit's REST API and
//! `ProfileDatabaseClient` writes profiles into the realtime JSON database.
//! Both implement the registration workflow's ports.

mod client;
mod database;
mod error;
mod types;

pub use client::IdentityClient;
pub use database::ProfileDatabaseClient;
pub use error::IdentityError;
pub use types::SignUpResponse;
