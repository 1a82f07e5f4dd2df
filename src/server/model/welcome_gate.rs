//! Domain models for the welcome gate.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

/// Per-guild onboarding gate.
///
/// Members holding `initial_role_id` press the agree button on the prompt message to
/// swap it for `final_role_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct WelcomeGate {
    pub guild_id: u64,
    pub channel_id: u64,
    /// Prompt message id, unset until the prompt has been posted.
    pub message_id: Option<u64>,
    pub initial_role_id: u64,
    pub final_role_id: u64,
    pub message_content: String,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
}

impl WelcomeGate {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The database entity model to convert
    ///
    /// # Returns
    /// - `Ok(WelcomeGate)` - Successfully converted domain model
    /// - `Err(DbErr::Custom)` - A stored id failed to parse as u64
    pub fn from_entity(entity: entity::welcome_gate::Model) -> Result<Self, DbErr> {
        let parse = |value: &str, column: &str| {
            value
                .parse::<u64>()
                .map_err(|e| DbErr::Custom(format!("Failed to parse {}: {}", column, e)))
        };

        let message_id = match entity.message_id.as_deref() {
            Some(id) => Some(parse(id, "message_id")?),
            None => None,
        };

        Ok(Self {
            guild_id: parse(&entity.guild_id, "guild_id")?,
            channel_id: parse(&entity.channel_id, "channel_id")?,
            message_id,
            initial_role_id: parse(&entity.initial_role_id, "initial_role_id")?,
            final_role_id: parse(&entity.final_role_id, "final_role_id")?,
            message_content: entity.message_content,
            enabled: entity.enabled,
            created_at: entity.created_at,
        })
    }
}

/// Parameters for installing a guild's welcome gate, replacing any previous one.
#[derive(Debug, Clone)]
pub struct SetWelcomeGateParam {
    pub guild_id: u64,
    pub channel_id: u64,
    pub initial_role_id: u64,
    pub final_role_id: u64,
    pub message_content: String,
}
