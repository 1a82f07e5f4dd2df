//! Event logger.
//!
//! Records audit events for guilds whose configuration enables them. Each event is
//! written to the store first and then posted as an embed to the configured log channel.
//! The post is best-effort: a missing channel or a refused send never loses the row.
//!
//! Handlers translate gateway events into the plain structs below so the logger can be
//! driven without serenity models.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::server::{
    data::log_event::LogEventRepository,
    error::AppError,
    gateway::GuildGateway,
    model::{
        config::ServerConfig,
        guild::{GuildChannelKind, GuildRole},
        log_event::{CreateLogEventParam, EventType, LogEvent, LogNotice},
    },
    util::{color::format_color, name::truncate},
};

const RED: u32 = 0xe74c3c;
const ORANGE: u32 = 0xe67e22;
const GREEN: u32 = 0x2ecc71;
const BLUE: u32 = 0x3498db;

/// Longest message content shown in a deletion notice.
const DELETED_PREVIEW_LEN: usize = 1000;
/// Longest before/after content shown in an edit notice.
const EDITED_PREVIEW_LEN: usize = 500;
/// Most held roles listed when a member leaves.
const LEFT_ROLES_SHOWN: usize = 10;

/// Member or user as shown in notices.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRef {
    pub id: u64,
    /// Account name, without discriminator.
    pub name: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

impl UserRef {
    fn label(&self) -> String {
        format!("{} (@{})", self.display_name, self.name)
    }
}

#[derive(Debug, Clone)]
pub struct DeletedMessage {
    pub author: UserRef,
    pub channel_id: u64,
    pub message_id: u64,
    pub content: String,
    pub attachments: Vec<String>,
    pub embeds: usize,
}

#[derive(Debug, Clone)]
pub struct EditedMessage {
    pub author: UserRef,
    pub channel_id: u64,
    pub message_id: u64,
    pub before: String,
    pub after: String,
}

#[derive(Debug, Clone)]
pub struct JoinedMember {
    pub user: UserRef,
    pub account_created: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct LeftMember {
    pub user: UserRef,
    /// Names of the roles held on leaving, without `@everyone`.
    pub roles: Vec<String>,
    pub joined_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct UpdatedMember {
    pub user: UserRef,
    pub before_name: String,
    pub after_name: String,
    pub before_roles: Vec<String>,
    pub after_roles: Vec<String>,
}

/// Human-readable changes between two states of a member.
///
/// Empty when neither the display name nor the role set changed.
pub fn member_changes(update: &UpdatedMember) -> Vec<String> {
    let mut changes = Vec::new();

    if update.before_name != update.after_name {
        changes.push(format!(
            "Nickname: `{}` → `{}`",
            update.before_name, update.after_name
        ));
    }

    let added: Vec<&str> = update
        .after_roles
        .iter()
        .filter(|r| !update.before_roles.contains(r))
        .map(String::as_str)
        .collect();
    let removed: Vec<&str> = update
        .before_roles
        .iter()
        .filter(|r| !update.after_roles.contains(r))
        .map(String::as_str)
        .collect();

    if !added.is_empty() {
        changes.push(format!("Roles added: {}", added.join(", ")));
    }
    if !removed.is_empty() {
        changes.push(format!("Roles removed: {}", removed.join(", ")));
    }

    changes
}

/// Human-readable changes between two states of a role.
///
/// Only name, color and permissions are compared.
pub fn role_changes(before: &GuildRole, after: &GuildRole) -> Vec<String> {
    let mut changes = Vec::new();

    if before.name != after.name {
        changes.push(format!("Name: `{}` → `{}`", before.name, after.name));
    }

    if before.color != after.color {
        let show = |color: u32| {
            if color == 0 {
                "default".to_string()
            } else {
                format_color(color)
            }
        };
        changes.push(format!(
            "Color: `{}` → `{}`",
            show(before.color),
            show(after.color)
        ));
    }

    if before.permissions != after.permissions {
        changes.push("Permissions changed".to_string());
    }

    changes
}

fn code_block(text: &str, max: usize) -> String {
    format!("```\n{}\n```", truncate(text, max))
}

pub struct EventLogService<'a> {
    db: &'a DatabaseConnection,
    gateway: &'a dyn GuildGateway,
}

impl<'a> EventLogService<'a> {
    pub fn new(db: &'a DatabaseConnection, gateway: &'a dyn GuildGateway) -> Self {
        Self { db, gateway }
    }

    /// Records a deleted message.
    ///
    /// # Returns
    /// - `Ok(Some(LogEvent))` - The stored event
    /// - `Ok(None)` - The guild does not log this event type
    /// - `Err(AppError)` - The row could not be written
    pub async fn message_deleted(
        &self,
        config: &ServerConfig,
        message: &DeletedMessage,
    ) -> Result<Option<LogEvent>, AppError> {
        let mut param = self.param(EventType::MessageDelete);
        param.user_id = Some(message.author.id);
        param.channel_id = Some(message.channel_id);
        param.message_id = Some(message.message_id);
        param.content = (!message.content.is_empty()).then(|| message.content.clone());
        param.additional_data = Some(json!({
            "attachments": message.attachments,
            "embeds": message.embeds,
        }));

        let mut notice = LogNotice::new("🗑️ Message deleted", RED)
            .field("User", message.author.label(), true)
            .field("Channel", format!("<#{}>", message.channel_id), true)
            .field("Message ID", message.message_id.to_string(), true);
        if !message.content.is_empty() {
            notice = notice.field(
                "Content",
                code_block(&message.content, DELETED_PREVIEW_LEN),
                false,
            );
        }
        if !message.attachments.is_empty() {
            notice = notice.field("Attachments", message.attachments.join(", "), false);
        }

        self.record(config, param, notice).await
    }

    /// Records an edited message. Edits that leave the content unchanged are ignored.
    pub async fn message_edited(
        &self,
        config: &ServerConfig,
        message: &EditedMessage,
    ) -> Result<Option<LogEvent>, AppError> {
        if message.before == message.after {
            return Ok(None);
        }

        let mut param = self.param(EventType::MessageEdit);
        param.user_id = Some(message.author.id);
        param.channel_id = Some(message.channel_id);
        param.message_id = Some(message.message_id);
        param.content = Some(format!(
            "Before: {}\nAfter: {}",
            message.before, message.after
        ));
        param.additional_data = Some(json!({
            "before_length": message.before.chars().count(),
            "after_length": message.after.chars().count(),
        }));

        let link = format!(
            "https://discord.com/channels/{}/{}/{}",
            self.gateway.guild_id(),
            message.channel_id,
            message.message_id
        );
        let mut notice = LogNotice::new("✏️ Message edited", ORANGE)
            .field("User", message.author.label(), true)
            .field("Channel", format!("<#{}>", message.channel_id), true)
            .field("Message", format!("[Jump]({})", link), true);
        if !message.before.is_empty() {
            notice = notice.field(
                "Before",
                code_block(&message.before, EDITED_PREVIEW_LEN),
                false,
            );
        }
        if !message.after.is_empty() {
            notice = notice.field(
                "After",
                code_block(&message.after, EDITED_PREVIEW_LEN),
                false,
            );
        }

        self.record(config, param, notice).await
    }

    pub async fn member_joined(
        &self,
        config: &ServerConfig,
        member: &JoinedMember,
    ) -> Result<Option<LogEvent>, AppError> {
        let now = Utc::now();

        let mut param = self.param(EventType::MemberJoin);
        param.user_id = Some(member.user.id);
        param.content = Some(format!("{} joined the server", member.user.display_name));
        param.additional_data = Some(json!({
            "account_created": member.account_created.to_rfc3339(),
            "avatar_url": member.user.avatar_url,
        }));

        let account_age = (now - member.account_created).num_days();
        let mut notice = LogNotice::new("📥 Member joined", GREEN)
            .field("User", member.user.label(), true)
            .field("User ID", member.user.id.to_string(), true)
            .field("Account created", format!("{} days ago", account_age), true)
            .field("Joined at", format!("<t:{}:F>", now.timestamp()), false);
        if let Some(url) = &member.user.avatar_url {
            notice = notice.thumbnail(url.clone());
        }

        self.record(config, param, notice).await
    }

    pub async fn member_left(
        &self,
        config: &ServerConfig,
        member: &LeftMember,
    ) -> Result<Option<LogEvent>, AppError> {
        let now = Utc::now();

        let mut param = self.param(EventType::MemberLeave);
        param.user_id = Some(member.user.id);
        param.content = Some(format!("{} left the server", member.user.display_name));
        param.additional_data = Some(json!({
            "roles": member.roles,
            "joined_at": member.joined_at.map(|t| t.to_rfc3339()),
        }));

        let stayed = member
            .joined_at
            .map(|joined| format!("{} days", (now - joined).num_days()))
            .unwrap_or_else(|| "Unknown".to_string());
        let mut notice = LogNotice::new("📤 Member left", RED)
            .field("User", member.user.label(), true)
            .field("User ID", member.user.id.to_string(), true)
            .field("Time in server", stayed, true)
            .field("Left at", format!("<t:{}:F>", now.timestamp()), false);
        if !member.roles.is_empty() {
            let shown: Vec<&str> = member
                .roles
                .iter()
                .take(LEFT_ROLES_SHOWN)
                .map(String::as_str)
                .collect();
            notice = notice.field("Roles held", shown.join(", "), false);
        }
        if let Some(url) = &member.user.avatar_url {
            notice = notice.thumbnail(url.clone());
        }

        self.record(config, param, notice).await
    }

    /// Records a nickname or role change. Updates with neither are ignored.
    pub async fn member_updated(
        &self,
        config: &ServerConfig,
        update: &UpdatedMember,
    ) -> Result<Option<LogEvent>, AppError> {
        let changes = member_changes(update);
        if changes.is_empty() {
            return Ok(None);
        }

        let mut param = self.param(EventType::MemberUpdate);
        param.user_id = Some(update.user.id);
        param.content = Some(format!("{} was updated", update.before_name));
        param.additional_data = Some(json!({
            "changes": changes,
            "before_roles": update.before_roles,
            "after_roles": update.after_roles,
        }));

        let notice = LogNotice::new("👤 Member updated", BLUE)
            .field("User", update.user.label(), true)
            .field("Changes", changes.join("\n"), false);

        self.record(config, param, notice).await
    }

    /// Records a name, color or permission change to a role. Other edits are ignored.
    pub async fn role_updated(
        &self,
        config: &ServerConfig,
        before: &GuildRole,
        after: &GuildRole,
    ) -> Result<Option<LogEvent>, AppError> {
        let changes = role_changes(before, after);
        if changes.is_empty() {
            return Ok(None);
        }

        let mut param = self.param(EventType::RoleUpdate);
        param.content = Some(format!("Role '{}' was updated", after.name));
        param.additional_data = Some(json!({
            "role_id": after.id,
            "changes": changes,
        }));

        let notice = LogNotice::new("🎭 Role updated", after.color)
            .field("Role", after.name.clone(), true)
            .field("Changes", changes.join("\n"), false);

        self.record(config, param, notice).await
    }

    fn param(&self, event_type: EventType) -> CreateLogEventParam {
        CreateLogEventParam::new(self.gateway.guild_id(), event_type)
    }

    /// Writes the event if the guild logs its type, then posts the notice.
    async fn record(
        &self,
        config: &ServerConfig,
        param: CreateLogEventParam,
        notice: LogNotice,
    ) -> Result<Option<LogEvent>, AppError> {
        if !config.logs_event(param.event_type) {
            return Ok(None);
        }
        let event = LogEventRepository::new(self.db).create(param).await?;

        match self.log_channel(config).await {
            Ok(Some(channel_id)) => {
                if let Err(e) = self.gateway.send_notice(channel_id, &notice).await {
                    tracing::warn!(
                        "Failed to post {} notice in guild {}: {}",
                        event.event_type,
                        event.guild_id,
                        e
                    );
                }
            }
            Ok(None) => {
                tracing::debug!(
                    "No log channel for guild {}, {} stored only",
                    event.guild_id,
                    event.event_type
                );
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to resolve log channel in guild {}: {}",
                    event.guild_id,
                    e
                );
            }
        }

        Ok(Some(event))
    }

    /// Finds the text channel named by `logging.log_channel`.
    async fn log_channel(&self, config: &ServerConfig) -> Result<Option<u64>, AppError> {
        let Some(name) = config
            .active_logging()
            .and_then(|logging| logging.log_channel.as_deref())
        else {
            return Ok(None);
        };

        let channels = self.gateway.channels().await?;

        Ok(channels
            .iter()
            .find(|c| c.kind == GuildChannelKind::Text && c.name == name)
            .map(|c| c.id))
    }
}

#[cfg(test)]
mod test;
