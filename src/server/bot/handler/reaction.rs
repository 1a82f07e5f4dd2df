//! Reaction events driving reaction roles.

use serenity::all::{Context, Reaction};

use crate::server::{
    bot::handler::gateway_for,
    service::reaction_role::{ReactionOutcome, ReactionRoleService},
    state::AppState,
    util::emoji::reaction_key,
};

enum Direction {
    Add,
    Remove,
}

pub async fn handle_reaction_add(state: &AppState, ctx: Context, reaction: Reaction) {
    handle(state, ctx, reaction, Direction::Add).await;
}

pub async fn handle_reaction_remove(state: &AppState, ctx: Context, reaction: Reaction) {
    handle(state, ctx, reaction, Direction::Remove).await;
}

async fn handle(state: &AppState, ctx: Context, reaction: Reaction, direction: Direction) {
    let (Some(guild_id), Some(user_id)) = (reaction.guild_id, reaction.user_id) else {
        return;
    };
    if user_id == ctx.cache.current_user().id {
        return;
    }
    let Some(key) = reaction_key(&reaction.emoji) else {
        return;
    };

    let gateway = gateway_for(&ctx, guild_id);
    let service = ReactionRoleService::new(&state.db, &gateway);
    let message_id = reaction.message_id.get();

    let result = match direction {
        Direction::Add => service.on_reaction_add(user_id.get(), message_id, &key).await,
        Direction::Remove => {
            service
                .on_reaction_remove(user_id.get(), message_id, &key)
                .await
        }
    };

    match result {
        Ok(ReactionOutcome::StaleRemoved) => {
            tracing::info!(
                "Dropped reaction role on message {} whose role no longer exists",
                message_id
            );
        }
        Ok(_) => {}
        Err(e) => {
            tracing::error!(
                "Failed to apply reaction role for user {} on message {}: {}",
                user_id,
                message_id,
                e
            );
        }
    }
}
