//! Application state shared by every event handler.
//!
//! The state is built once during startup and cloned into the bot's event handler and
//! the retention scheduler.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::server::config::{Config, ConfigStore};

/// Shared resources for the bot.
///
/// All fields are cheap to clone:
/// - `DatabaseConnection` is a connection pool (clones share the pool)
/// - `Arc<ConfigStore>` shares the per-guild documents
/// - `Arc<Config>` shares the environment settings
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Configuration documents, with per-guild overrides installed by `/setup_file`.
    pub configs: Arc<ConfigStore>,

    /// Settings loaded from the environment.
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, configs: ConfigStore, config: Config) -> Self {
        Self {
            db,
            configs: Arc::new(configs),
            config: Arc::new(config),
        }
    }
}
