//! Reaction-role binding factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test reaction-role bindings with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let binding = ReactionRoleFactory::new(&db, 1)
///     .message_id(42)
///     .emoji("👍")
///     .build()
///     .await?;
/// ```
pub struct ReactionRoleFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: u64,
    channel_id: u64,
    message_id: u64,
    emoji: String,
    role_id: u64,
}

impl<'a> ReactionRoleFactory<'a> {
    /// Creates a new ReactionRoleFactory with default values.
    ///
    /// Defaults:
    /// - channel_id, message_id, role_id: unique generated ids
    /// - emoji: `"👍"`
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the row
    /// - `guild_id` - Guild the binding belongs to
    pub fn new(db: &'a DatabaseConnection, guild_id: u64) -> Self {
        Self {
            db,
            guild_id,
            channel_id: next_id(),
            message_id: next_id(),
            emoji: "👍".to_string(),
            role_id: next_id(),
        }
    }

    pub fn channel_id(mut self, channel_id: u64) -> Self {
        self.channel_id = channel_id;
        self
    }

    pub fn message_id(mut self, message_id: u64) -> Self {
        self.message_id = message_id;
        self
    }

    pub fn emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = emoji.into();
        self
    }

    pub fn role_id(mut self, role_id: u64) -> Self {
        self.role_id = role_id;
        self
    }

    /// Builds and inserts the binding row into the database.
    ///
    /// # Returns
    /// - `Ok(entity::reaction_role::Model)` - Created row
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::reaction_role::Model, DbErr> {
        entity::reaction_role::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id.to_string()),
            channel_id: ActiveValue::Set(self.channel_id.to_string()),
            message_id: ActiveValue::Set(self.message_id.to_string()),
            emoji: ActiveValue::Set(self.emoji),
            role_id: ActiveValue::Set(self.role_id.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a reaction-role binding with default values.
///
/// Shorthand for `ReactionRoleFactory::new(db, guild_id).build().await`.
pub async fn create_reaction_role(
    db: &DatabaseConnection,
    guild_id: u64,
) -> Result<entity::reaction_role::Model, DbErr> {
    ReactionRoleFactory::new(db, guild_id).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use entity::prelude::*;

    #[tokio::test]
    async fn creates_unique_bindings() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_table(ReactionRole)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let first = create_reaction_role(db, 1).await?;
        let second = create_reaction_role(db, 1).await?;

        assert_eq!(first.guild_id, "1");
        assert_ne!(first.message_id, second.message_id);
        assert_ne!(first.id, second.id);

        Ok(())
    }
}
