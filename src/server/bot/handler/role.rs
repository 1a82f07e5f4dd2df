//! Role events feeding the event logger.

use serenity::all::{Context, Role};

use crate::server::{
    bot::handler::gateway_for, model::guild::GuildRole, service::event_log::EventLogService,
    state::AppState,
};

/// Logs name, color and permission changes to a role.
///
/// Without the cached previous state there is nothing to compare, so the event is skipped.
pub async fn handle_guild_role_update(
    state: &AppState,
    ctx: Context,
    old_data_if_available: Option<Role>,
    new: Role,
) {
    let Some(old) = old_data_if_available else {
        return;
    };

    let guild_id = new.guild_id;
    let config = state.configs.for_guild(guild_id.get());
    let gateway = gateway_for(&ctx, guild_id);

    if let Err(e) = EventLogService::new(&state.db, &gateway)
        .role_updated(
            &config,
            &GuildRole::from_serenity(&old),
            &GuildRole::from_serenity(&new),
        )
        .await
    {
        tracing::error!("Failed to log update of role {}: {}", new.id, e);
    }
}
