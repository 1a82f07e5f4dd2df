//! Gateway event dispatch.
//!
//! Each event is handed to the matching submodule. Handlers log failures and never
//! propagate them: an error in one event must not stop the client.

use chrono::{DateTime, Utc};
use serenity::all::{
    ChannelId, Context, EventHandler, GuildId, GuildMemberUpdateEvent, Interaction, Member,
    Message, MessageId, MessageUpdateEvent, Reaction, Ready, Role, RoleId, Timestamp, User,
};
use serenity::async_trait;
use std::sync::atomic::AtomicBool;

use crate::server::{gateway::SerenityGateway, service::event_log::UserRef, state::AppState};

pub mod interaction;
pub mod member;
pub mod message;
pub mod reaction;
pub mod ready;
pub mod role;

use message::MessageCache;

/// Discord bot event handler
pub struct Handler {
    pub state: AppState,
    /// Set once the retention scheduler runs, so reconnects do not start another.
    pub scheduler_started: AtomicBool,
    pub messages: MessageCache,
}

impl Handler {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            scheduler_started: AtomicBool::new(false),
            messages: MessageCache::default(),
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(&self.state, &self.scheduler_started, ctx, ready).await;
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction_create(&self.state, ctx, interaction).await;
    }

    async fn reaction_add(&self, ctx: Context, reaction: Reaction) {
        reaction::handle_reaction_add(&self.state, ctx, reaction).await;
    }

    async fn reaction_remove(&self, ctx: Context, reaction: Reaction) {
        reaction::handle_reaction_remove(&self.state, ctx, reaction).await;
    }

    async fn message(&self, _ctx: Context, new_message: Message) {
        message::handle_message(&self.messages, new_message);
    }

    async fn message_delete(
        &self,
        ctx: Context,
        channel_id: ChannelId,
        deleted_message_id: MessageId,
        guild_id: Option<GuildId>,
    ) {
        message::handle_message_delete(
            &self.state,
            &self.messages,
            ctx,
            channel_id,
            deleted_message_id,
            guild_id,
        )
        .await;
    }

    async fn message_update(
        &self,
        ctx: Context,
        old_if_available: Option<Message>,
        new: Option<Message>,
        event: MessageUpdateEvent,
    ) {
        message::handle_message_update(
            &self.state,
            &self.messages,
            ctx,
            old_if_available,
            new,
            event,
        )
        .await;
    }

    async fn guild_member_addition(&self, ctx: Context, new_member: Member) {
        member::handle_guild_member_addition(&self.state, ctx, new_member).await;
    }

    async fn guild_member_removal(
        &self,
        ctx: Context,
        guild_id: GuildId,
        user: User,
        member_data_if_available: Option<Member>,
    ) {
        member::handle_guild_member_removal(
            &self.state,
            ctx,
            guild_id,
            user,
            member_data_if_available,
        )
        .await;
    }

    /// Called when a member's roles or nickname change
    async fn guild_member_update(
        &self,
        ctx: Context,
        old_if_available: Option<Member>,
        new: Option<Member>,
        event: GuildMemberUpdateEvent,
    ) {
        member::handle_guild_member_update(&self.state, ctx, old_if_available, new, event).await;
    }

    async fn guild_role_update(&self, ctx: Context, old_data_if_available: Option<Role>, new: Role) {
        role::handle_guild_role_update(&self.state, ctx, old_data_if_available, new).await;
    }
}

pub(crate) fn gateway_for(ctx: &Context, guild_id: GuildId) -> SerenityGateway {
    SerenityGateway::new(ctx.http.clone(), guild_id)
}

/// Builds the logger's view of a user, preferring the guild nickname for display.
pub(crate) fn user_ref(user: &User, nick: Option<String>) -> UserRef {
    UserRef {
        id: user.id.get(),
        name: user.name.clone(),
        display_name: nick.unwrap_or_else(|| user.display_name().to_string()),
        avatar_url: Some(user.face()),
    }
}

/// Resolves role ids to names from the cache, skipping `@everyone` and unknown roles.
pub(crate) fn role_names(ctx: &Context, guild_id: GuildId, role_ids: &[RoleId]) -> Vec<String> {
    let Some(guild) = ctx.cache.guild(guild_id) else {
        return Vec::new();
    };

    role_ids
        .iter()
        .filter(|id| id.get() != guild_id.get())
        .filter_map(|id| guild.roles.get(id).map(|role| role.name.clone()))
        .collect()
}

pub(crate) fn to_utc(timestamp: &Timestamp) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(timestamp.unix_timestamp(), 0)
}
