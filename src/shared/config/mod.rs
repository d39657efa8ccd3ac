//! Application configuration module
//!
//! Provides the validated configuration consumed by the server, a builder
//! for assembling it from several sources, and the optional TOML file
//! layout.

use serde::Deserialize;
use thiserror::Error;

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 3000;

/// Default token lifetime (30 days)
pub const DEFAULT_TOKEN_TTL_HOURS: u64 = 30 * 24;

/// Default bcrypt work factor for password hashes
pub const DEFAULT_BCRYPT_COST: u32 = 12;

/// Fallback signing secret for local development only
pub const DEV_JWT_SECRET: &str = "kanban-dev-secret-change-in-production";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP server binds to
    pub server_port: u16,
    /// Postgres connection string; `None` selects the in-memory store
    pub database_url: Option<String>,
    /// HS256 signing secret for access tokens
    pub jwt_secret: String,
    /// Access token lifetime in hours
    pub token_ttl_hours: u64,
    /// Rebuild a column's `cardIds` cache when a read detects drift
    pub reconcile_on_read: bool,
    /// bcrypt work factor (4..=31)
    pub bcrypt_cost: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: DEFAULT_PORT,
            database_url: None,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
            reconcile_on_read: true,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingValue("jwt_secret"));
        }
        if self.token_ttl_hours == 0 {
            return Err(ConfigError::InvalidValue {
                key: "token_ttl_hours",
                message: "must be greater than zero".to_string(),
            });
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "bcrypt_cost",
                message: format!("{} is outside 4..=31", self.bcrypt_cost),
            });
        }
        if let Some(url) = &self.database_url {
            if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
                return Err(ConfigError::InvalidUrl(url.clone()));
            }
        }
        Ok(())
    }
}

/// Builder for AppConfig
///
/// Unset values fall back to [`AppConfig::default`].
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    server_port: Option<u16>,
    database_url: Option<String>,
    jwt_secret: Option<String>,
    token_ttl_hours: Option<u64>,
    reconcile_on_read: Option<bool>,
    bcrypt_cost: Option<u32>,
}

impl AppConfigBuilder {
    pub fn server_port(mut self, port: u16) -> Self {
        self.server_port = Some(port);
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn token_ttl_hours(mut self, hours: u64) -> Self {
        self.token_ttl_hours = Some(hours);
        self
    }

    pub fn reconcile_on_read(mut self, enabled: bool) -> Self {
        self.reconcile_on_read = Some(enabled);
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    /// Overlay values from a parsed config file; values already set win
    pub fn merge_file(mut self, file: FileConfig) -> Self {
        self.server_port = self.server_port.or(file.server_port);
        self.database_url = self.database_url.or(file.database_url);
        self.jwt_secret = self.jwt_secret.or(file.jwt_secret);
        self.token_ttl_hours = self.token_ttl_hours.or(file.token_ttl_hours);
        self.reconcile_on_read = self.reconcile_on_read.or(file.reconcile_on_read);
        self.bcrypt_cost = self.bcrypt_cost.or(file.bcrypt_cost);
        self
    }

    /// Whether a signing secret was supplied by any source
    pub fn has_jwt_secret(&self) -> bool {
        self.jwt_secret.is_some()
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let config = AppConfig {
            server_port: self.server_port.unwrap_or(defaults.server_port),
            database_url: self.database_url.filter(|url| !url.trim().is_empty()),
            jwt_secret: self.jwt_secret.unwrap_or(defaults.jwt_secret),
            token_ttl_hours: self.token_ttl_hours.unwrap_or(defaults.token_ttl_hours),
            reconcile_on_read: self.reconcile_on_read.unwrap_or(defaults.reconcile_on_read),
            bcrypt_cost: self.bcrypt_cost.unwrap_or(defaults.bcrypt_cost),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Layout of the optional TOML config file
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct FileConfig {
    pub server_port: Option<u16>,
    pub database_url: Option<String>,
    pub jwt_secret: Option<String>,
    pub token_ttl_hours: Option<u64>,
    pub reconcile_on_read: Option<bool>,
    pub bcrypt_cost: Option<u32>,
}

impl FileConfig {
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}
