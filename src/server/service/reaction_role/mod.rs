//! Reaction-role binder.
//!
//! Binds an emoji on a message to a role and applies the binding when members react.
//! Core roles are never bound; they are managed by the configuration document.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::reaction_role::ReactionRoleRepository,
    error::AppError,
    gateway::GuildGateway,
    model::{
        config::ServerConfig,
        guild::{GuildChannelKind, GuildRole},
        reaction_role::{ReactionRole, UpsertReactionRoleParam},
    },
    util::{emoji::ParsedEmoji, parse::parse_message_id},
};

/// What a reaction event did to the member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionOutcome {
    /// No binding for this reaction, or the user is not a member.
    Ignored,
    /// The bound role no longer exists; the binding was deleted.
    StaleRemoved,
    /// The member already had (or already lacked) the role.
    Unchanged,
    Granted,
    Revoked,
}

enum ReactionTarget {
    None,
    Stale,
    Member { role_id: u64, member_roles: Vec<u64> },
}

pub struct ReactionRoleService<'a> {
    db: &'a DatabaseConnection,
    gateway: &'a dyn GuildGateway,
}

impl<'a> ReactionRoleService<'a> {
    pub fn new(db: &'a DatabaseConnection, gateway: &'a dyn GuildGateway) -> Self {
        Self { db, gateway }
    }

    /// Binds `emoji` on a message to `role`, replacing any role already bound to it.
    ///
    /// The message is searched for across the guild's text channels. The bot adds the
    /// reaction itself so members can click it.
    ///
    /// # Arguments
    /// - `config` - Active document, used to reject core roles
    /// - `message_id` - Message id as typed by the user
    /// - `emoji` - Unicode emoji or custom emoji markup
    /// - `role` - Role to grant
    ///
    /// # Returns
    /// - `Ok(ReactionRole)` - The stored binding
    /// - `Err(AppError::BadRequest)` - Core or unassignable role, bad id, unknown custom emoji
    /// - `Err(AppError::NotFound)` - No text channel holds the message
    pub async fn bind(
        &self,
        config: &ServerConfig,
        message_id: &str,
        emoji: &str,
        role: &GuildRole,
    ) -> Result<ReactionRole, AppError> {
        let guild_id = self.gateway.guild_id();

        if config.is_core_role(&role.name) {
            return Err(AppError::BadRequest(format!(
                "'{}' is a core role and cannot be bound to a reaction. Use a sub-role instead.",
                role.name
            )));
        }
        if role.managed || role.id == guild_id {
            return Err(AppError::BadRequest(format!(
                "'{}' cannot be assigned to members.",
                role.name
            )));
        }

        let message_id = parse_message_id(message_id)?;

        let channel_id = self.locate_message(message_id).await?.ok_or_else(|| {
            AppError::NotFound(format!(
                "Message {} was not found in any text channel.",
                message_id
            ))
        })?;

        let emoji = self.parse_emoji(emoji).await?;

        self.gateway
            .add_reaction(channel_id, message_id, &emoji)
            .await?;

        let binding = ReactionRoleRepository::new(self.db)
            .upsert(UpsertReactionRoleParam {
                guild_id,
                channel_id,
                message_id,
                emoji: emoji.key(),
                role_id: role.id,
            })
            .await?;

        tracing::info!(
            "Bound {} on message {} to role {} in guild {}",
            emoji.display(),
            message_id,
            role.name,
            guild_id
        );

        Ok(binding)
    }

    /// Removes the binding for `emoji` on a message and clears that reaction.
    ///
    /// # Returns
    /// - `Ok(ReactionRole)` - The removed binding
    /// - `Err(AppError::BadRequest)` - Message id does not parse
    /// - `Err(AppError::NotFound)` - Nothing is bound to the reaction in this guild
    pub async fn unbind(&self, message_id: &str, emoji: &str) -> Result<ReactionRole, AppError> {
        let message_id = parse_message_id(message_id)?;
        let emoji = ParsedEmoji::parse(emoji.trim());
        let repo = ReactionRoleRepository::new(self.db);

        let binding = repo
            .find(message_id, &emoji.key())
            .await?
            .filter(|b| b.guild_id == self.gateway.guild_id())
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No reaction role is bound to {} on message {}.",
                    emoji.display(),
                    message_id
                ))
            })?;

        repo.delete(message_id, &binding.emoji).await?;

        if let Err(e) = self
            .gateway
            .clear_reaction(binding.channel_id, message_id, Some(&emoji))
            .await
        {
            tracing::warn!(
                "Failed to clear reaction {} from message {}: {}",
                emoji.display(),
                message_id,
                e
            );
        }

        Ok(binding)
    }

    /// Returns the role bound to a reaction, if any.
    pub async fn resolve(&self, message_id: u64, emoji_key: &str) -> Result<Option<u64>, AppError> {
        let binding = ReactionRoleRepository::new(self.db)
            .find(message_id, emoji_key)
            .await?;

        Ok(binding.map(|b| b.role_id))
    }

    /// Lists the guild's bindings whose role and channel still exist.
    ///
    /// Bindings pointing at a deleted role or channel are removed along the way.
    pub async fn list(&self) -> Result<Vec<ReactionRole>, AppError> {
        let repo = ReactionRoleRepository::new(self.db);
        let bindings = repo.get_by_guild(self.gateway.guild_id()).await?;
        if bindings.is_empty() {
            return Ok(bindings);
        }

        let roles = self.gateway.roles().await?;
        let channels = self.gateway.channels().await?;

        let mut valid = Vec::with_capacity(bindings.len());
        for binding in bindings {
            let role_exists = roles.iter().any(|r| r.id == binding.role_id);
            let channel_exists = channels.iter().any(|c| c.id == binding.channel_id);

            if role_exists && channel_exists {
                valid.push(binding);
            } else {
                tracing::info!(
                    "Removing dangling reaction role {} on message {}",
                    binding.id,
                    binding.message_id
                );
                repo.delete_by_id(binding.id).await?;
            }
        }

        Ok(valid)
    }

    /// Removes every binding on a message and clears all of its reactions.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of bindings removed, possibly zero
    /// - `Err(AppError::BadRequest)` - Message id does not parse
    pub async fn clear(&self, message_id: &str) -> Result<u64, AppError> {
        let message_id = parse_message_id(message_id)?;
        let guild_id = self.gateway.guild_id();
        let repo = ReactionRoleRepository::new(self.db);

        let channel_id = repo
            .get_by_guild(guild_id)
            .await?
            .into_iter()
            .find(|b| b.message_id == message_id)
            .map(|b| b.channel_id);

        let removed = repo.delete_by_message(guild_id, message_id).await?;

        if let Some(channel_id) = channel_id {
            if let Err(e) = self
                .gateway
                .clear_reaction(channel_id, message_id, None)
                .await
            {
                tracing::warn!("Failed to clear reactions from message {}: {}", message_id, e);
            }
        }

        Ok(removed)
    }

    /// Grants the bound role when a member reacts.
    pub async fn on_reaction_add(
        &self,
        user_id: u64,
        message_id: u64,
        emoji_key: &str,
    ) -> Result<ReactionOutcome, AppError> {
        let (role_id, member_roles) = match self.target(user_id, message_id, emoji_key).await? {
            ReactionTarget::Member {
                role_id,
                member_roles,
            } => (role_id, member_roles),
            ReactionTarget::Stale => return Ok(ReactionOutcome::StaleRemoved),
            ReactionTarget::None => return Ok(ReactionOutcome::Ignored),
        };

        if member_roles.contains(&role_id) {
            return Ok(ReactionOutcome::Unchanged);
        }

        self.gateway.add_member_role(user_id, role_id).await?;
        tracing::info!("Granted role {} to user {} by reaction", role_id, user_id);

        Ok(ReactionOutcome::Granted)
    }

    /// Revokes the bound role when a member removes their reaction.
    pub async fn on_reaction_remove(
        &self,
        user_id: u64,
        message_id: u64,
        emoji_key: &str,
    ) -> Result<ReactionOutcome, AppError> {
        let (role_id, member_roles) = match self.target(user_id, message_id, emoji_key).await? {
            ReactionTarget::Member {
                role_id,
                member_roles,
            } => (role_id, member_roles),
            ReactionTarget::Stale => return Ok(ReactionOutcome::StaleRemoved),
            ReactionTarget::None => return Ok(ReactionOutcome::Ignored),
        };

        if !member_roles.contains(&role_id) {
            return Ok(ReactionOutcome::Unchanged);
        }

        self.gateway.remove_member_role(user_id, role_id).await?;
        tracing::info!("Revoked role {} from user {} by reaction", role_id, user_id);

        Ok(ReactionOutcome::Revoked)
    }

    /// Looks up the binding and the reacting member for a reaction event.
    ///
    /// A binding whose role no longer exists is deleted here.
    async fn target(
        &self,
        user_id: u64,
        message_id: u64,
        emoji_key: &str,
    ) -> Result<ReactionTarget, AppError> {
        let repo = ReactionRoleRepository::new(self.db);

        let Some(binding) = repo
            .find(message_id, emoji_key)
            .await?
            .filter(|b| b.guild_id == self.gateway.guild_id())
        else {
            return Ok(ReactionTarget::None);
        };

        let roles = self.gateway.roles().await?;
        if !roles.iter().any(|r| r.id == binding.role_id) {
            tracing::info!(
                "Role {} bound on message {} no longer exists, removing binding",
                binding.role_id,
                message_id
            );
            repo.delete_by_id(binding.id).await?;
            return Ok(ReactionTarget::Stale);
        }

        match self.gateway.member_role_ids(user_id).await? {
            Some(member_roles) => Ok(ReactionTarget::Member {
                role_id: binding.role_id,
                member_roles,
            }),
            None => Ok(ReactionTarget::None),
        }
    }

    /// Finds the first text channel that holds the message.
    async fn locate_message(&self, message_id: u64) -> Result<Option<u64>, AppError> {
        let channels = self.gateway.channels().await?;

        for channel in channels
            .iter()
            .filter(|c| c.kind == GuildChannelKind::Text)
        {
            if self.gateway.message_exists(channel.id, message_id).await? {
                return Ok(Some(channel.id));
            }
        }

        Ok(None)
    }

    /// Parses trimmed emoji input, requiring custom emojis to exist in the guild's catalogue.
    async fn parse_emoji(&self, input: &str) -> Result<ParsedEmoji, AppError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(AppError::BadRequest("An emoji is required.".to_string()));
        }

        let emoji = ParsedEmoji::parse(input);
        if let ParsedEmoji::Custom { id, .. } = &emoji {
            let available = self.gateway.emojis().await?.iter().any(|e| e.id == *id);
            if !available {
                return Err(AppError::BadRequest(format!(
                    "Custom emoji {} is not available in this server.",
                    emoji.display()
                )));
            }
        }

        Ok(emoji)
    }
}

#[cfg(test)]
mod test;
