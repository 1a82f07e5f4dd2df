//! Ready event: command registration and background jobs.

use serenity::all::{ActivityData, Context, Ready};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::server::{bot::command, scheduler::log_retention, state::AppState};

/// Handles the ready event when the bot connects to Discord.
///
/// Fires again after every reconnect. Commands are re-registered each time (the
/// registration is idempotent) while the retention scheduler is only started once.
pub async fn handle_ready(
    state: &AppState,
    scheduler_started: &AtomicBool,
    ctx: Context,
    ready: Ready,
) {
    tracing::info!(
        "{} is connected to Discord in {} guilds",
        ready.user.name,
        ready.guilds.len()
    );

    ctx.set_activity(Some(ActivityData::watching("the server layout")));

    if let Err(e) = command::register(&ctx, state.config.dev_guild_id).await {
        tracing::error!("Failed to register commands: {}", e);
    }

    if scheduler_started.swap(true, Ordering::SeqCst) {
        return;
    }

    if let Err(e) = log_retention::start_scheduler(
        state.db.clone(),
        state.configs.clone(),
        ctx.cache.clone(),
        state.config.log_retention_interval_hours,
    )
    .await
    {
        tracing::error!("Failed to start log retention scheduler: {}", e);
        scheduler_started.store(false, Ordering::SeqCst);
    }
}
