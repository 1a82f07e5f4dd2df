//! Welcome gate repository.
//!
//! A guild has at most one gate, keyed by guild id. Installing a gate replaces the
//! previous row; the prompt message id is patched in after the prompt has been posted.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait};

use crate::server::model::welcome_gate::{SetWelcomeGateParam, WelcomeGate};

/// Repository providing database operations for welcome gates.
pub struct WelcomeGateRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> WelcomeGateRepository<'a> {
    /// Creates a new WelcomeGateRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `WelcomeGateRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the gate configured for a guild.
    ///
    /// # Returns
    /// - `Ok(Some(WelcomeGate))` - Gate exists, enabled or not
    /// - `Ok(None)` - Guild has no gate
    /// - `Err(DbErr)` - Database error or unparsable stored id
    pub async fn get(&self, guild_id: u64) -> Result<Option<WelcomeGate>, DbErr> {
        let entity = entity::prelude::WelcomeGate::find_by_id(guild_id.to_string())
            .one(self.db)
            .await?;

        entity.map(WelcomeGate::from_entity).transpose()
    }

    /// Installs a guild's gate, replacing any previous one.
    ///
    /// The new gate is enabled and has no prompt message until `set_message_id` is called.
    ///
    /// # Arguments
    /// - `param` - Channel, roles and prompt text for the gate
    ///
    /// # Returns
    /// - `Ok(WelcomeGate)` - The installed gate
    /// - `Err(DbErr)` - Database error during replace
    pub async fn set(&self, param: SetWelcomeGateParam) -> Result<WelcomeGate, DbErr> {
        entity::prelude::WelcomeGate::delete_by_id(param.guild_id.to_string())
            .exec(self.db)
            .await?;

        let entity = entity::welcome_gate::ActiveModel {
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            channel_id: ActiveValue::Set(param.channel_id.to_string()),
            message_id: ActiveValue::Set(None),
            initial_role_id: ActiveValue::Set(param.initial_role_id.to_string()),
            final_role_id: ActiveValue::Set(param.final_role_id.to_string()),
            message_content: ActiveValue::Set(param.message_content),
            enabled: ActiveValue::Set(true),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        WelcomeGate::from_entity(entity)
    }

    /// Records the id of the posted prompt message.
    ///
    /// # Returns
    /// - `Ok(())` - Message id stored
    /// - `Err(DbErr::RecordNotFound)` - Guild has no gate
    /// - `Err(DbErr)` - Database error during update
    pub async fn set_message_id(&self, guild_id: u64, message_id: u64) -> Result<(), DbErr> {
        let existing = entity::prelude::WelcomeGate::find_by_id(guild_id.to_string())
            .one(self.db)
            .await?
            .ok_or_else(|| {
                DbErr::RecordNotFound(format!("Welcome gate for guild {} not found", guild_id))
            })?;

        let mut active: entity::welcome_gate::ActiveModel = existing.into();
        active.message_id = ActiveValue::Set(Some(message_id.to_string()));
        active.update(self.db).await?;

        Ok(())
    }
}

#[cfg(test)]
mod test;
