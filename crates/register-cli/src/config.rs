//! Application configuration loaded from environment variables.

use anyhow::{Context, Result};
use registration::{ControllerSettings, Locale};
use serde::Deserialize;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Identity toolkit and profile database configuration
    pub identity: IdentityConfig,

    /// Registration form configuration
    #[serde(default)]
    pub form: FormConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    /// Web API key of the identity project
    pub api_key: String,

    /// Identity toolkit base URL
    #[serde(default = "default_auth_url")]
    pub auth_url: String,

    /// Realtime database base URL
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Request timeout
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FormConfig {
    /// How long the success message stays up before redirecting
    #[serde(default = "default_redirect_delay", with = "humantime_serde")]
    pub redirect_delay: Duration,

    /// Route opened after a successful registration
    #[serde(default = "default_redirect_path")]
    pub redirect_path: String,

    /// Profile write attempts before giving up
    #[serde(default = "default_profile_save_attempts")]
    pub profile_save_attempts: u32,

    /// Message language (en, fr)
    #[serde(default)]
    pub locale: Locale,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl FormConfig {
    /// Controller settings derived from this configuration.
    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            redirect_path: self.redirect_path.clone(),
            redirect_delay: self.redirect_delay,
            profile_save_attempts: self.profile_save_attempts,
            locale: self.locale,
            ..ControllerSettings::default()
        }
    }
}

// Default implementations
impl Default for FormConfig {
    fn default() -> Self {
        Self {
            redirect_delay: default_redirect_delay(),
            redirect_path: default_redirect_path(),
            profile_save_attempts: default_profile_save_attempts(),
            locale: Locale::default(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// Default value functions
fn default_auth_url() -> String {
    "https://identitytoolkit.googleapis.com".into()
}

fn default_database_url() -> String {
    "http://localhost:9000".into()
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_redirect_delay() -> Duration {
    Duration::from_millis(2000)
}

fn default_redirect_path() -> String {
    "/login".into()
}

fn default_profile_save_attempts() -> u32 {
    3
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    // Keep values as strings; serde converts numeric fields.
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
