use std::env;
use std::path::PathBuf;

use auth::KeySource;
use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub authentication: AuthenticationConfig,
    pub seed: Option<SeedConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// Token and basic-gate settings.
///
/// Keys are given either inline as base64 encoded PEM (`private_key`,
/// `public_key`) or as paths to PEM files. Inline values win.
#[derive(Debug, Deserialize, Clone)]
pub struct AuthenticationConfig {
    #[serde(default = "default_application")]
    pub application: String,
    pub basic_username: String,
    pub basic_password: String,
    pub private_key: Option<String>,
    pub public_key: Option<String>,
    pub private_key_path: Option<PathBuf>,
    pub public_key_path: Option<PathBuf>,
    #[serde(default = "default_token_lifetime_hours")]
    pub token_lifetime_hours: i64,
}

/// Admin account created on first start.
#[derive(Debug, Deserialize, Clone)]
pub struct SeedConfig {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

fn default_max_connections() -> u32 {
    5
}

fn default_application() -> String {
    "DEVORIA".to_string()
}

fn default_token_lifetime_hours() -> i64 {
    auth::jwt::DEFAULT_TOKEN_LIFETIME_HOURS
}

/// Longest accepted token lifetime: ten years.
pub const MAX_TOKEN_LIFETIME_HOURS: i64 = 10 * 366 * 24;

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, AUTHENTICATION__PRIVATE_KEY, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: AUTHENTICATION__BASIC_PASSWORD=... overrides authentication.basic_password
            .add_source(Environment::default().separator("__"))
            .build()?;

        configuration.try_deserialize()
    }
}

impl AuthenticationConfig {
    pub fn private_key_source(&self) -> Result<KeySource, ConfigError> {
        key_source("private", &self.private_key, &self.private_key_path)
    }

    pub fn public_key_source(&self) -> Result<KeySource, ConfigError> {
        key_source("public", &self.public_key, &self.public_key_path)
    }

    /// Validated token lifetime.
    ///
    /// # Errors
    /// * `Message` - `token_lifetime_hours` is not between 1 and [`MAX_TOKEN_LIFETIME_HOURS`]
    pub fn token_lifetime(&self) -> Result<Duration, ConfigError> {
        let hours = self.token_lifetime_hours;
        if !(1..=MAX_TOKEN_LIFETIME_HOURS).contains(&hours) {
            return Err(ConfigError::Message(format!(
                "authentication.token_lifetime_hours must be between 1 and \
                 {MAX_TOKEN_LIFETIME_HOURS}, got {hours}"
            )));
        }

        Ok(Duration::hours(hours))
    }
}

fn key_source(
    kind: &str,
    inline: &Option<String>,
    path: &Option<PathBuf>,
) -> Result<KeySource, ConfigError> {
    match (inline, path) {
        (Some(encoded), _) if !encoded.trim().is_empty() => Ok(KeySource::Inline(encoded.clone())),
        (_, Some(path)) => Ok(KeySource::File(path.clone())),
        _ => Err(ConfigError::Message(format!(
            "authentication.{kind}_key or authentication.{kind}_key_path must be set"
        ))),
    }
}
