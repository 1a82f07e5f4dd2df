mod server;

use tracing_subscriber::EnvFilter;

use crate::server::{
    bot,
    config::{Config, ConfigStore},
    error::AppError,
    startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let configs = ConfigStore::load(&config.config_path).await?;
    let db = startup::connect_to_database(&config).await?;

    tracing::info!("Starting guildwright");

    bot::start::start_bot(AppState::new(db, configs, config)).await
}
