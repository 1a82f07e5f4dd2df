//! Serenity-backed implementation of the guild gateway.

use async_trait::async_trait;
use serenity::{
    all::{
        ButtonStyle, ChannelId, ChannelType, Colour, CreateActionRow, CreateButton, CreateChannel,
        CreateEmbed, CreateMessage, EditRole, GuildId, MessageId, PermissionOverwrite,
        PermissionOverwriteType, Permissions, RoleId, Timestamp, UserId,
    },
    http::Http,
};
use std::sync::Arc;

use crate::server::{
    error::AppError,
    gateway::{GuildGateway, WELCOME_AGREE_ID},
    model::{
        guild::{
            GuildChannelInfo, GuildChannelKind, GuildEmoji, GuildRole, NewChannel, NewRole,
            OverwriteTarget,
        },
        log_event::LogNotice,
    },
    util::emoji::ParsedEmoji,
};

const WELCOME_TITLE: &str = "🚪 Welcome to the server!";
const WELCOME_COLOR: u32 = 0x3498db;

/// Gateway for one guild over serenity's HTTP client.
pub struct SerenityGateway {
    http: Arc<Http>,
    guild_id: GuildId,
}

impl SerenityGateway {
    /// Creates a gateway for a guild.
    ///
    /// # Arguments
    /// - `http` - Arc-wrapped Discord HTTP client shared with the bot client
    /// - `guild_id` - Guild every operation is scoped to
    pub fn new(http: Arc<Http>, guild_id: GuildId) -> Self {
        Self { http, guild_id }
    }
}

/// Maps 403 and 404 responses into the bot's error taxonomy.
fn map_discord_error(err: serenity::Error, action: &str) -> AppError {
    if let serenity::Error::Http(ref http_err) = err {
        match http_err.status_code().map(|status| status.as_u16()) {
            Some(403) => return AppError::PermissionDenied(action.to_string()),
            Some(404) => return AppError::NotFound(format!("Not found while trying to {}", action)),
            _ => {}
        }
    }

    AppError::from(err)
}

fn to_serenity_overwrite(
    target: OverwriteTarget,
    allow: Permissions,
    deny: Permissions,
) -> PermissionOverwrite {
    let kind = match target {
        OverwriteTarget::Role(id) => PermissionOverwriteType::Role(RoleId::new(id)),
        OverwriteTarget::Member(id) => PermissionOverwriteType::Member(UserId::new(id)),
    };

    PermissionOverwrite { allow, deny, kind }
}

#[async_trait]
impl GuildGateway for SerenityGateway {
    fn guild_id(&self) -> u64 {
        self.guild_id.get()
    }

    async fn guild_name(&self) -> Result<String, AppError> {
        let guild = self
            .http
            .get_guild(self.guild_id)
            .await
            .map_err(|e| map_discord_error(e, "read the guild"))?;

        Ok(guild.name)
    }

    async fn roles(&self) -> Result<Vec<GuildRole>, AppError> {
        let roles = self
            .http
            .get_guild_roles(self.guild_id)
            .await
            .map_err(|e| map_discord_error(e, "read roles"))?;

        Ok(roles.iter().map(GuildRole::from_serenity).collect())
    }

    async fn create_role(&self, role: NewRole) -> Result<GuildRole, AppError> {
        let mut builder = EditRole::new()
            .name(&role.name)
            .permissions(role.permissions)
            .audit_log_reason("Server setup");
        if let Some(color) = role.color {
            builder = builder.colour(Colour::new(color));
        }

        let created = self
            .guild_id
            .create_role(&self.http, builder)
            .await
            .map_err(|e| map_discord_error(e, "create roles"))?;

        Ok(GuildRole::from_serenity(&created))
    }

    async fn delete_role(&self, role_id: u64) -> Result<(), AppError> {
        self.guild_id
            .delete_role(&self.http, RoleId::new(role_id))
            .await
            .map_err(|e| map_discord_error(e, "delete roles"))
    }

    async fn channels(&self) -> Result<Vec<GuildChannelInfo>, AppError> {
        let channels = self
            .http
            .get_channels(self.guild_id)
            .await
            .map_err(|e| map_discord_error(e, "read channels"))?;

        Ok(channels.iter().map(GuildChannelInfo::from_serenity).collect())
    }

    async fn create_channel(&self, channel: NewChannel) -> Result<GuildChannelInfo, AppError> {
        let kind = match channel.kind {
            GuildChannelKind::Voice => ChannelType::Voice,
            GuildChannelKind::Category => ChannelType::Category,
            GuildChannelKind::Text | GuildChannelKind::Other => ChannelType::Text,
        };
        let overwrites: Vec<PermissionOverwrite> = channel
            .overwrites
            .iter()
            .map(|o| to_serenity_overwrite(o.target, o.allow, o.deny))
            .collect();

        let mut builder = CreateChannel::new(&channel.name)
            .kind(kind)
            .permissions(overwrites)
            .audit_log_reason("Server setup");
        if let Some(parent_id) = channel.parent_id {
            builder = builder.category(ChannelId::new(parent_id));
        }

        let created = self
            .guild_id
            .create_channel(&self.http, builder)
            .await
            .map_err(|e| map_discord_error(e, "create channels"))?;

        Ok(GuildChannelInfo::from_serenity(&created))
    }

    async fn delete_channel(&self, channel_id: u64) -> Result<(), AppError> {
        ChannelId::new(channel_id)
            .delete(&self.http)
            .await
            .map_err(|e| map_discord_error(e, "delete channels"))?;

        Ok(())
    }

    async fn emojis(&self) -> Result<Vec<GuildEmoji>, AppError> {
        let emojis = self
            .guild_id
            .emojis(&self.http)
            .await
            .map_err(|e| map_discord_error(e, "read emojis"))?;

        Ok(emojis.iter().map(GuildEmoji::from_serenity).collect())
    }

    async fn message_exists(&self, channel_id: u64, message_id: u64) -> Result<bool, AppError> {
        match self
            .http
            .get_message(ChannelId::new(channel_id), MessageId::new(message_id))
            .await
            .map_err(|e| map_discord_error(e, "read messages"))
        {
            Ok(_) => Ok(true),
            Err(AppError::NotFound(_)) | Err(AppError::PermissionDenied(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn add_reaction(
        &self,
        channel_id: u64,
        message_id: u64,
        emoji: &ParsedEmoji,
    ) -> Result<(), AppError> {
        self.http
            .create_reaction(
                ChannelId::new(channel_id),
                MessageId::new(message_id),
                &emoji.to_reaction_type(),
            )
            .await
            .map_err(|e| map_discord_error(e, "add reactions"))
    }

    async fn clear_reaction(
        &self,
        channel_id: u64,
        message_id: u64,
        emoji: Option<&ParsedEmoji>,
    ) -> Result<(), AppError> {
        let channel_id = ChannelId::new(channel_id);
        let message_id = MessageId::new(message_id);

        let result = match emoji {
            Some(emoji) => {
                self.http
                    .delete_message_reaction_emoji(channel_id, message_id, &emoji.to_reaction_type())
                    .await
            }
            None => self.http.delete_message_reactions(channel_id, message_id).await,
        };

        result.map_err(|e| map_discord_error(e, "manage messages"))
    }

    async fn send_welcome_prompt(&self, channel_id: u64, content: &str) -> Result<u64, AppError> {
        let embed = CreateEmbed::new()
            .title(WELCOME_TITLE)
            .description(content)
            .colour(WELCOME_COLOR)
            .timestamp(Timestamp::now());
        let button = CreateButton::new(WELCOME_AGREE_ID)
            .label("✅ Agree")
            .style(ButtonStyle::Success);

        let message = ChannelId::new(channel_id)
            .send_message(
                &self.http,
                CreateMessage::new()
                    .embed(embed)
                    .components(vec![CreateActionRow::Buttons(vec![button])]),
            )
            .await
            .map_err(|e| map_discord_error(e, "send messages"))?;

        Ok(message.id.get())
    }

    async fn send_notice(&self, channel_id: u64, notice: &LogNotice) -> Result<(), AppError> {
        let mut embed = CreateEmbed::new()
            .title(&notice.title)
            .colour(notice.color)
            .timestamp(Timestamp::now());
        if let Some(description) = &notice.description {
            embed = embed.description(description);
        }
        for (name, value, inline) in &notice.fields {
            embed = embed.field(name, value, *inline);
        }
        if let Some(url) = &notice.thumbnail {
            embed = embed.thumbnail(url);
        }

        ChannelId::new(channel_id)
            .send_message(&self.http, CreateMessage::new().embed(embed))
            .await
            .map_err(|e| map_discord_error(e, "send messages"))?;

        Ok(())
    }

    async fn member_role_ids(&self, user_id: u64) -> Result<Option<Vec<u64>>, AppError> {
        match self
            .http
            .get_member(self.guild_id, UserId::new(user_id))
            .await
            .map_err(|e| map_discord_error(e, "read members"))
        {
            Ok(member) => Ok(Some(member.roles.iter().map(|id| id.get()).collect())),
            Err(AppError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn add_member_role(&self, user_id: u64, role_id: u64) -> Result<(), AppError> {
        self.http
            .add_member_role(
                self.guild_id,
                UserId::new(user_id),
                RoleId::new(role_id),
                None,
            )
            .await
            .map_err(|e| map_discord_error(e, "manage roles"))
    }

    async fn remove_member_role(&self, user_id: u64, role_id: u64) -> Result<(), AppError> {
        self.http
            .remove_member_role(
                self.guild_id,
                UserId::new(user_id),
                RoleId::new(role_id),
                None,
            )
            .await
            .map_err(|e| map_discord_error(e, "manage roles"))
    }
}
