//! Welcome gate factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating a guild's welcome gate row.
///
/// Defaults to an enabled gate with a posted prompt message.
pub struct WelcomeGateFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: u64,
    channel_id: u64,
    message_id: Option<u64>,
    initial_role_id: u64,
    final_role_id: u64,
    message_content: String,
    enabled: bool,
}

impl<'a> WelcomeGateFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, guild_id: u64) -> Self {
        Self {
            db,
            guild_id,
            channel_id: next_id(),
            message_id: Some(next_id()),
            initial_role_id: next_id(),
            final_role_id: next_id(),
            message_content: "Please read the rules and press agree.".to_string(),
            enabled: true,
        }
    }

    pub fn channel_id(mut self, channel_id: u64) -> Self {
        self.channel_id = channel_id;
        self
    }

    pub fn message_id(mut self, message_id: Option<u64>) -> Self {
        self.message_id = message_id;
        self
    }

    pub fn initial_role_id(mut self, role_id: u64) -> Self {
        self.initial_role_id = role_id;
        self
    }

    pub fn final_role_id(mut self, role_id: u64) -> Self {
        self.final_role_id = role_id;
        self
    }

    pub fn message_content(mut self, content: impl Into<String>) -> Self {
        self.message_content = content.into();
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Builds and inserts the gate row into the database.
    ///
    /// # Returns
    /// - `Ok(entity::welcome_gate::Model)` - Created row
    /// - `Err(DbErr)` - Database error during insert, including a second gate for the guild
    pub async fn build(self) -> Result<entity::welcome_gate::Model, DbErr> {
        entity::welcome_gate::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id.to_string()),
            channel_id: ActiveValue::Set(self.channel_id.to_string()),
            message_id: ActiveValue::Set(self.message_id.map(|id| id.to_string())),
            initial_role_id: ActiveValue::Set(self.initial_role_id.to_string()),
            final_role_id: ActiveValue::Set(self.final_role_id.to_string()),
            message_content: ActiveValue::Set(self.message_content),
            enabled: ActiveValue::Set(self.enabled),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an enabled welcome gate with default values.
pub async fn create_welcome_gate(
    db: &DatabaseConnection,
    guild_id: u64,
) -> Result<entity::welcome_gate::Model, DbErr> {
    WelcomeGateFactory::new(db, guild_id).build().await
}
