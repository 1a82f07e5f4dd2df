//! Reconciles a guild's structure with its configuration document.
//!
//! The run is applied item by item with no rollback: roles first, then categories and
//! their channels, then the welcome gate. A failed create or delete is logged and the
//! run moves on. Without `force`, existing roles and channels matched by name are reused,
//! so running twice with an unchanged document creates nothing the second time.

use sea_orm::DatabaseConnection;
use std::collections::HashMap;

use crate::server::{
    data::welcome_gate::WelcomeGateRepository,
    error::AppError,
    gateway::GuildGateway,
    model::{
        config::{ChannelKind, OverwriteSpec, ServerConfig, WelcomeGateSpec, EVERYONE},
        guild::{
            ChannelOverwrite, GuildChannelInfo, GuildChannelKind, GuildRole, NewChannel, NewRole,
            OverwriteTarget,
        },
        permission::PermissionKey,
        welcome_gate::SetWelcomeGateParam,
    },
    util::{color::parse_color, name::normalize_channel_name},
};

/// Counts of what a reconcile run produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    /// Roles created or reused.
    pub roles: usize,
    /// Channels created or reused, categories excluded.
    pub channels: usize,
    /// Whether a welcome gate prompt was posted.
    pub welcome_gate: bool,
}

pub struct SetupService<'a> {
    db: &'a DatabaseConnection,
    gateway: &'a dyn GuildGateway,
}

impl<'a> SetupService<'a> {
    pub fn new(db: &'a DatabaseConnection, gateway: &'a dyn GuildGateway) -> Self {
        Self { db, gateway }
    }

    /// Brings the guild in line with the document.
    ///
    /// # Arguments
    /// - `config` - Document to apply
    /// - `force` - Delete and recreate roles, categories and channels that already exist
    ///
    /// # Returns
    /// - `Ok(ReconcileSummary)` - Run finished; individual failures were logged
    /// - `Err(AppError)` - The guild's roles or channels could not be read
    pub async fn reconcile(
        &self,
        config: &ServerConfig,
        force: bool,
    ) -> Result<ReconcileSummary, AppError> {
        let guild_id = self.gateway.guild_id();
        tracing::info!("Reconciling guild {} (force: {})", guild_id, force);

        let roles = self.setup_roles(config, force).await?;
        let channels = self.setup_channels(config, &roles, force).await?;

        let welcome_gate = match &config.welcome_gate {
            Some(spec) if spec.enabled => match self.setup_welcome_gate(spec).await {
                Ok(()) => true,
                Err(e) => {
                    tracing::error!("Failed to set up welcome gate in guild {}: {}", guild_id, e);
                    false
                }
            },
            _ => false,
        };

        let summary = ReconcileSummary {
            roles: roles.len(),
            channels,
            welcome_gate,
        };
        tracing::info!("Reconciled guild {}: {:?}", guild_id, summary);

        Ok(summary)
    }

    /// Creates or reuses every configured role and returns them by name.
    async fn setup_roles(
        &self,
        config: &ServerConfig,
        force: bool,
    ) -> Result<HashMap<String, GuildRole>, AppError> {
        let existing_roles = self.gateway.roles().await?;
        let mut roles = HashMap::new();

        for spec in &config.roles {
            if let Some(existing) = existing_roles.iter().find(|r| r.name == spec.name) {
                if !force {
                    tracing::debug!("Reusing role {}", spec.name);
                    roles.insert(spec.name.clone(), existing.clone());
                    continue;
                }

                if let Err(e) = self.gateway.delete_role(existing.id).await {
                    tracing::warn!(
                        "Failed to delete role {} for rebuild, keeping it: {}",
                        spec.name,
                        e
                    );
                    roles.insert(spec.name.clone(), existing.clone());
                    continue;
                }
                tracing::info!("Deleted role {} for rebuild", spec.name);
            }

            let new_role = NewRole {
                name: spec.name.clone(),
                color: spec.color.as_deref().and_then(parse_color),
                permissions: spec.permission_set.permissions(),
            };

            match self.gateway.create_role(new_role).await {
                Ok(role) => {
                    tracing::info!("Created role {} ({})", spec.name, spec.permission_set);
                    roles.insert(spec.name.clone(), role);
                }
                Err(e) => tracing::error!("Failed to create role {}: {}", spec.name, e),
            }
        }

        Ok(roles)
    }

    /// Creates or reuses every category and channel, returning the channel count.
    async fn setup_channels(
        &self,
        config: &ServerConfig,
        roles: &HashMap<String, GuildRole>,
        force: bool,
    ) -> Result<usize, AppError> {
        let mut channels = self.gateway.channels().await?;
        let guild_roles = self.gateway.roles().await?;
        let mut count = 0;

        for category_spec in &config.channels {
            let Some(category_id) = self
                .find_or_create(
                    &mut channels,
                    &category_spec.category,
                    GuildChannelKind::Category,
                    None,
                    Vec::new(),
                    force,
                )
                .await
            else {
                continue;
            };

            for item in &category_spec.items {
                let name = normalize_channel_name(&item.name);
                let kind = match item.kind {
                    ChannelKind::Text => GuildChannelKind::Text,
                    ChannelKind::Voice => GuildChannelKind::Voice,
                };
                let overwrites = self.build_overwrites(&item.permissions, roles, &guild_roles);

                if self
                    .find_or_create(
                        &mut channels,
                        &name,
                        kind,
                        Some(category_id),
                        overwrites,
                        force,
                    )
                    .await
                    .is_some()
                {
                    count += 1;
                }
            }
        }

        Ok(count)
    }

    /// Finds a channel by name under `parent_id`, recreating it when `force` is set.
    ///
    /// Categories are matched among categories, channels among the category's children.
    /// Overwrites are only applied to newly created channels. Returns the channel id, or
    /// `None` when it neither exists nor could be created.
    async fn find_or_create(
        &self,
        channels: &mut Vec<GuildChannelInfo>,
        name: &str,
        kind: GuildChannelKind,
        parent_id: Option<u64>,
        overwrites: Vec<ChannelOverwrite>,
        force: bool,
    ) -> Option<u64> {
        let existing = channels
            .iter()
            .find(|c| {
                c.name == name
                    && match kind {
                        GuildChannelKind::Category => c.kind == GuildChannelKind::Category,
                        _ => c.parent_id == parent_id && c.kind != GuildChannelKind::Category,
                    }
            })
            .map(|c| c.id);

        if let Some(existing_id) = existing {
            if !force {
                tracing::debug!("Reusing channel {}", name);
                return Some(existing_id);
            }

            if let Err(e) = self.gateway.delete_channel(existing_id).await {
                tracing::warn!("Failed to delete channel {} for rebuild, keeping it: {}", name, e);
                return Some(existing_id);
            }
            channels.retain(|c| c.id != existing_id);
            tracing::info!("Deleted channel {} for rebuild", name);
        }

        let new_channel = NewChannel {
            name: name.to_string(),
            kind,
            parent_id,
            overwrites,
        };

        match self.gateway.create_channel(new_channel).await {
            Ok(created) => {
                tracing::info!("Created channel {} ({:?})", name, kind);
                let id = created.id;
                channels.push(created);
                Some(id)
            }
            Err(e) => {
                tracing::error!("Failed to create channel {}: {}", name, e);
                None
            }
        }
    }

    /// Resolves overwrite targets and folds their permission keys into bits.
    ///
    /// `@everyone` maps to the guild's default role; other names are looked up among the
    /// roles this run produced, then among all guild roles. Unresolved targets are skipped.
    fn build_overwrites(
        &self,
        specs: &[OverwriteSpec],
        roles: &HashMap<String, GuildRole>,
        guild_roles: &[GuildRole],
    ) -> Vec<ChannelOverwrite> {
        specs
            .iter()
            .filter_map(|spec| {
                let role_id = if spec.role == EVERYONE {
                    Some(self.gateway.guild_id())
                } else {
                    roles
                        .get(&spec.role)
                        .or_else(|| guild_roles.iter().find(|r| r.name == spec.role))
                        .map(|r| r.id)
                };

                let Some(role_id) = role_id else {
                    tracing::warn!("Role {} not found for channel overwrite, skipping", spec.role);
                    return None;
                };

                Some(ChannelOverwrite {
                    target: OverwriteTarget::Role(role_id),
                    allow: PermissionKey::combine(&spec.allow),
                    deny: PermissionKey::combine(&spec.deny),
                })
            })
            .collect()
    }

    /// Posts the welcome prompt and stores the guild's gate.
    async fn setup_welcome_gate(&self, spec: &WelcomeGateSpec) -> Result<(), AppError> {
        let guild_id = self.gateway.guild_id();
        let channel_name = normalize_channel_name(&spec.channel);

        let channel = self
            .gateway
            .channels()
            .await?
            .into_iter()
            .find(|c| c.kind == GuildChannelKind::Text && c.name == channel_name)
            .ok_or_else(|| {
                AppError::NotFound(format!("Welcome gate channel '{}' not found", spec.channel))
            })?;

        let roles = self.gateway.roles().await?;
        let find_role = |name: &str| {
            roles
                .iter()
                .find(|r| r.name == name)
                .map(|r| r.id)
                .ok_or_else(|| AppError::NotFound(format!("Welcome gate role '{}' not found", name)))
        };
        let initial_role_id = find_role(&spec.initial_role)?;
        let final_role_id = find_role(&spec.final_role)?;

        let message_id = self
            .gateway
            .send_welcome_prompt(channel.id, &spec.message)
            .await?;

        let repo = WelcomeGateRepository::new(self.db);
        repo.set(SetWelcomeGateParam {
            guild_id,
            channel_id: channel.id,
            initial_role_id,
            final_role_id,
            message_content: spec.message.clone(),
        })
        .await?;
        repo.set_message_id(guild_id, message_id).await?;

        tracing::info!("Welcome gate posted in #{} of guild {}", channel.name, guild_id);

        Ok(())
    }
}

#[cfg(test)]
mod test;
