//! Member events feeding the event logger.

use chrono::Utc;
use serenity::all::{Context, GuildId, GuildMemberUpdateEvent, Member, User};

use crate::server::{
    bot::handler::{gateway_for, role_names, to_utc, user_ref},
    service::event_log::{EventLogService, JoinedMember, LeftMember, UpdatedMember},
    state::AppState,
};

pub async fn handle_guild_member_addition(state: &AppState, ctx: Context, new_member: Member) {
    let guild_id = new_member.guild_id;
    let joined = JoinedMember {
        user: user_ref(&new_member.user, new_member.nick.clone()),
        account_created: to_utc(&new_member.user.id.created_at()).unwrap_or_else(Utc::now),
    };

    let config = state.configs.for_guild(guild_id.get());
    let gateway = gateway_for(&ctx, guild_id);
    if let Err(e) = EventLogService::new(&state.db, &gateway)
        .member_joined(&config, &joined)
        .await
    {
        tracing::error!("Failed to log join of user {}: {}", new_member.user.id, e);
    }
}

pub async fn handle_guild_member_removal(
    state: &AppState,
    ctx: Context,
    guild_id: GuildId,
    user: User,
    member_data_if_available: Option<Member>,
) {
    let (nick, roles, joined_at) = match member_data_if_available.as_ref() {
        Some(member) => (
            member.nick.clone(),
            role_names(&ctx, guild_id, &member.roles),
            member.joined_at.as_ref().and_then(to_utc),
        ),
        None => (None, Vec::new(), None),
    };
    let left = LeftMember {
        user: user_ref(&user, nick),
        roles,
        joined_at,
    };

    let config = state.configs.for_guild(guild_id.get());
    let gateway = gateway_for(&ctx, guild_id);
    if let Err(e) = EventLogService::new(&state.db, &gateway)
        .member_left(&config, &left)
        .await
    {
        tracing::error!("Failed to log departure of user {}: {}", user.id, e);
    }
}

/// Logs nickname and role changes.
///
/// The previous state comes from the cache; updates for members the cache did not hold
/// cannot be diffed and are skipped.
pub async fn handle_guild_member_update(
    state: &AppState,
    ctx: Context,
    old: Option<Member>,
    _new: Option<Member>,
    event: GuildMemberUpdateEvent,
) {
    let Some(old) = old else {
        return;
    };
    if event.user.bot {
        return;
    }

    let guild_id = event.guild_id;
    let update = UpdatedMember {
        user: user_ref(&event.user, event.nick.clone()),
        before_name: old.display_name().to_string(),
        after_name: event
            .nick
            .clone()
            .unwrap_or_else(|| event.user.display_name().to_string()),
        before_roles: role_names(&ctx, guild_id, &old.roles),
        after_roles: role_names(&ctx, guild_id, &event.roles),
    };

    let config = state.configs.for_guild(guild_id.get());
    let gateway = gateway_for(&ctx, guild_id);
    if let Err(e) = EventLogService::new(&state.db, &gateway)
        .member_updated(&config, &update)
        .await
    {
        tracing::error!("Failed to log update of user {}: {}", event.user.id, e);
    }
}
