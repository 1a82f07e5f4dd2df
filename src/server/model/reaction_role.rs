//! Domain models for reaction-role bindings.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

/// Binding of an emoji on a message to a role.
///
/// At most one binding exists per (message, emoji).
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionRole {
    pub id: i32,
    pub guild_id: u64,
    pub channel_id: u64,
    pub message_id: u64,
    /// Emoji key: the unicode literal, or the numeric id of a custom emoji.
    pub emoji: String,
    pub role_id: u64,
    pub created_at: DateTime<Utc>,
}

impl ReactionRole {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The database entity model to convert
    ///
    /// # Returns
    /// - `Ok(ReactionRole)` - Successfully converted domain model
    /// - `Err(DbErr::Custom)` - A stored id failed to parse as u64
    pub fn from_entity(entity: entity::reaction_role::Model) -> Result<Self, DbErr> {
        let parse = |value: &str, column: &str| {
            value
                .parse::<u64>()
                .map_err(|e| DbErr::Custom(format!("Failed to parse {}: {}", column, e)))
        };

        Ok(Self {
            id: entity.id,
            guild_id: parse(&entity.guild_id, "guild_id")?,
            channel_id: parse(&entity.channel_id, "channel_id")?,
            message_id: parse(&entity.message_id, "message_id")?,
            emoji: entity.emoji,
            role_id: parse(&entity.role_id, "role_id")?,
            created_at: entity.created_at,
        })
    }
}

/// Parameters for creating or replacing a binding.
#[derive(Debug, Clone)]
pub struct UpsertReactionRoleParam {
    pub guild_id: u64,
    pub channel_id: u64,
    pub message_id: u64,
    pub emoji: String,
    pub role_id: u64,
}
