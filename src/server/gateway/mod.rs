//! Platform seam between the bot's services and Discord.
//!
//! Services talk to a guild through [`GuildGateway`] instead of serenity's HTTP client
//! directly. [`SerenityGateway`] is the production implementation; tests use an
//! in-memory fake that records every outbound call.

mod client;

#[cfg(test)]
pub mod fake;

use async_trait::async_trait;

use crate::server::{
    error::AppError,
    model::{
        guild::{GuildChannelInfo, GuildEmoji, GuildRole, NewChannel, NewRole},
        log_event::LogNotice,
    },
    util::emoji::ParsedEmoji,
};

pub use client::SerenityGateway;

/// Custom id of the welcome gate's agree button.
pub const WELCOME_AGREE_ID: &str = "welcome_agree";

/// Operations the bot performs against one guild.
///
/// Discord refusals surface as `AppError::PermissionDenied` (HTTP 403) and
/// `AppError::NotFound` (HTTP 404); every other failure is `AppError::DiscordErr`.
#[async_trait]
pub trait GuildGateway: Send + Sync {
    /// Guild id, which is also the id of the guild's `@everyone` role.
    fn guild_id(&self) -> u64;

    async fn guild_name(&self) -> Result<String, AppError>;

    async fn roles(&self) -> Result<Vec<GuildRole>, AppError>;

    async fn create_role(&self, role: NewRole) -> Result<GuildRole, AppError>;

    async fn delete_role(&self, role_id: u64) -> Result<(), AppError>;

    /// All channels and categories of the guild.
    async fn channels(&self) -> Result<Vec<GuildChannelInfo>, AppError>;

    async fn create_channel(&self, channel: NewChannel) -> Result<GuildChannelInfo, AppError>;

    async fn delete_channel(&self, channel_id: u64) -> Result<(), AppError>;

    /// Custom emoji catalogue of the guild.
    async fn emojis(&self) -> Result<Vec<GuildEmoji>, AppError>;

    /// Returns whether the message can be fetched from the channel.
    ///
    /// A missing message and a channel the bot cannot read both count as absent.
    async fn message_exists(&self, channel_id: u64, message_id: u64) -> Result<bool, AppError>;

    async fn add_reaction(
        &self,
        channel_id: u64,
        message_id: u64,
        emoji: &ParsedEmoji,
    ) -> Result<(), AppError>;

    /// Clears one emoji's reactions from a message, or all reactions when `emoji` is `None`.
    async fn clear_reaction(
        &self,
        channel_id: u64,
        message_id: u64,
        emoji: Option<&ParsedEmoji>,
    ) -> Result<(), AppError>;

    /// Posts the welcome embed with the agree button and returns the message id.
    async fn send_welcome_prompt(&self, channel_id: u64, content: &str) -> Result<u64, AppError>;

    async fn send_notice(&self, channel_id: u64, notice: &LogNotice) -> Result<(), AppError>;

    /// Returns the member's role ids, or `None` if the user is not in the guild.
    async fn member_role_ids(&self, user_id: u64) -> Result<Option<Vec<u64>>, AppError>;

    async fn add_member_role(&self, user_id: u64, role_id: u64) -> Result<(), AppError>;

    async fn remove_member_role(&self, user_id: u64, role_id: u64) -> Result<(), AppError>;
}
