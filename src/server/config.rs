//! Process configuration and per-guild configuration documents.

use dashmap::DashMap;
use std::{path::PathBuf, sync::Arc};

use crate::server::{
    error::{config::ConfigError, AppError},
    model::config::ServerConfig,
    service::validator::parse_config,
};

const DEFAULT_DATABASE_URL: &str = "sqlite://discord_bot.db?mode=rwc";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";
const DEFAULT_TEMPLATE_DIR: &str = "templates";
const DEFAULT_RETENTION_INTERVAL_HOURS: u64 = 24;

/// Settings read from the environment at startup.
pub struct Config {
    pub discord_bot_token: String,
    pub database_url: String,
    /// `EnvFilter` directive for the tracing subscriber.
    pub log_level: String,
    /// When set, commands are registered on this guild only.
    pub dev_guild_id: Option<u64>,
    pub config_path: PathBuf,
    pub template_dir: PathBuf,
    pub log_retention_interval_hours: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            discord_bot_token: std::env::var("DISCORD_BOT_TOKEN")
                .map_err(|_| ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))?,
            database_url: env_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            log_level: env_or("LOG_LEVEL", DEFAULT_LOG_LEVEL),
            dev_guild_id: std::env::var("DEV_GUILD_ID")
                .ok()
                .map(|value| parse_env("DEV_GUILD_ID", value))
                .transpose()?,
            config_path: PathBuf::from(env_or("CONFIG_PATH", DEFAULT_CONFIG_PATH)),
            template_dir: PathBuf::from(env_or("TEMPLATE_DIR", DEFAULT_TEMPLATE_DIR)),
            log_retention_interval_hours: match std::env::var("LOG_RETENTION_INTERVAL_HOURS") {
                Ok(value) => parse_env("LOG_RETENTION_INTERVAL_HOURS", value)?,
                Err(_) => DEFAULT_RETENTION_INTERVAL_HOURS,
            },
        })
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T: std::str::FromStr>(name: &str, value: String) -> Result<T, ConfigError> {
    value.parse::<T>().map_err(|_| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value,
    })
}

/// Holds the configuration document each guild runs under.
///
/// Every guild uses the default document loaded at startup unless `/setup_file`
/// installed an override for it. Overrides live in memory only.
pub struct ConfigStore {
    default: Arc<ServerConfig>,
    overrides: DashMap<u64, Arc<ServerConfig>>,
}

impl ConfigStore {
    pub fn new(default: ServerConfig) -> Self {
        Self {
            default: Arc::new(default),
            overrides: DashMap::new(),
        }
    }

    /// Reads and validates the default document.
    ///
    /// # Returns
    /// - `Ok(ConfigStore)` - Store holding the parsed document
    /// - `Err(AppError::ConfigErr)` - File could not be read
    /// - `Err(AppError::InvalidConfig)` - Document is not YAML or is invalid
    pub async fn load(path: &std::path::Path) -> Result<Self, AppError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::ConfigFile {
                path: path.display().to_string(),
                source,
            })?;

        let config = parse_config(&text)?;
        tracing::info!(
            "Loaded configuration '{}' from {}",
            config.server_name,
            path.display()
        );

        Ok(Self::new(config))
    }

    /// Returns the document the guild runs under.
    pub fn for_guild(&self, guild_id: u64) -> Arc<ServerConfig> {
        self.overrides
            .get(&guild_id)
            .map(|entry| Arc::clone(entry.value()))
            .unwrap_or_else(|| Arc::clone(&self.default))
    }

    /// Installs a document for one guild, replacing any earlier override.
    pub fn set_override(&self, guild_id: u64, config: ServerConfig) -> Arc<ServerConfig> {
        let config = Arc::new(config);
        self.overrides.insert(guild_id, Arc::clone(&config));
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(name: &str) -> ServerConfig {
        ServerConfig {
            server_name: name.to_string(),
            roles: Vec::new(),
            channels: Vec::new(),
            welcome_gate: None,
            logging: None,
        }
    }

    #[test]
    fn guilds_fall_back_to_default() {
        let store = ConfigStore::new(document("default"));
        assert_eq!(store.for_guild(1).server_name, "default");
    }

    #[test]
    fn override_applies_to_one_guild() {
        let store = ConfigStore::new(document("default"));
        store.set_override(1, document("custom"));

        assert_eq!(store.for_guild(1).server_name, "custom");
        assert_eq!(store.for_guild(2).server_name, "default");
    }
}
