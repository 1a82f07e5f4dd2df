use serenity::all::{Client, GatewayIntents};

use crate::server::{bot::handler::Handler, error::AppError, state::AppState};

/// Starts the Discord bot and runs it until the gateway connection ends.
///
/// # Arguments
/// - `state` - Shared application state handed to every event handler
///
/// # Returns
/// - `Ok(())` if the client shuts down cleanly
/// - `Err(AppError)` if client construction or the gateway connection fails
pub async fn start_bot(state: AppState) -> Result<(), AppError> {
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MESSAGE_REACTIONS
        | GatewayIntents::GUILD_EMOJIS_AND_STICKERS;

    let token = state.config.discord_bot_token.clone();
    let mut client = Client::builder(&token, intents)
        .event_handler(Handler::new(state))
        .await?;

    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
