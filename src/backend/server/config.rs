/**
 * Server Configuration
 *
 * Loads `AppConfig` from the environment (after `.env`), optionally layered
 * over a TOML file named by `KANBAN_CONFIG`, and opens the document store.
 *
 * # Sources (highest priority first)
 *
 * 1. Environment variables: `SERVER_PORT`, `DATABASE_URL`, `JWT_SECRET`,
 *    `TOKEN_TTL_HOURS`, `RECONCILE_ON_READ`, `BCRYPT_COST`
 * 2. The TOML file at `KANBAN_CONFIG`
 * 3. Built-in defaults
 *
 * # Store selection
 *
 * With a `DATABASE_URL` the Postgres store is used; if it is unset or the
 * connection fails the server logs a warning and runs on the in-memory
 * store instead.
 */

use std::str::FromStr;
use std::sync::Arc;

use crate::backend::store::{DocumentStore, MemoryStore, PgStore};
use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError, FileConfig};

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T: FromStr>(key: &'static str) -> Result<Option<T>, ConfigError>
where
    T::Err: std::fmt::Display,
{
    env_value(key)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue {
                key,
                message: format!("{} ({})", raw, e),
            })
        })
        .transpose()
}

/// Apply environment overrides to a builder
pub fn apply_env(mut builder: AppConfigBuilder) -> Result<AppConfigBuilder, ConfigError> {
    if let Some(port) = parse_env::<u16>("SERVER_PORT")? {
        builder = builder.server_port(port);
    }
    if let Some(url) = env_value("DATABASE_URL") {
        builder = builder.database_url(url);
    }
    if let Some(secret) = env_value("JWT_SECRET") {
        builder = builder.jwt_secret(secret);
    }
    if let Some(hours) = parse_env::<u64>("TOKEN_TTL_HOURS")? {
        builder = builder.token_ttl_hours(hours);
    }
    if let Some(enabled) = parse_env::<bool>("RECONCILE_ON_READ")? {
        builder = builder.reconcile_on_read(enabled);
    }
    if let Some(cost) = parse_env::<u32>("BCRYPT_COST")? {
        builder = builder.bcrypt_cost(cost);
    }
    Ok(builder)
}

/// Load the configuration from `.env`, the environment and `KANBAN_CONFIG`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    dotenv::dotenv().ok();

    let mut builder = apply_env(AppConfig::builder())?;

    if let Some(path) = env_value("KANBAN_CONFIG") {
        tracing::info!("Reading config file {}", path);
        let contents = std::fs::read_to_string(&path)?;
        builder = builder.merge_file(FileConfig::parse(&contents)?);
    }

    if !builder.has_jwt_secret() {
        tracing::warn!("JWT_SECRET not set, using the development secret. Do not use this in production.");
    }

    builder.build()
}

/// Open the configured store, falling back to memory
pub async fn load_store(config: &AppConfig) -> Arc<dyn DocumentStore> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set. Using the in-memory store; data is lost on restart.");
        return Arc::new(MemoryStore::new());
    };

    tracing::info!("Connecting to database...");
    match PgStore::connect(database_url).await {
        Ok(store) => {
            tracing::info!("Database connected and migrations applied");
            Arc::new(store)
        }
        Err(e) => {
            tracing::error!("Failed to open database: {}", e);
            tracing::warn!("Falling back to the in-memory store.");
            Arc::new(MemoryStore::new())
        }
    }
}
