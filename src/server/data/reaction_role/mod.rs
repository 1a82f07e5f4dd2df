//! Reaction-role binding repository.
//!
//! Provides the `ReactionRoleRepository` for the (message, emoji) → role table. Bindings
//! are replaced in place when the same (message, emoji) is bound again, so the table never
//! holds two roles for one reaction.

use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::model::reaction_role::{ReactionRole, UpsertReactionRoleParam};

/// Repository providing database operations for reaction-role bindings.
pub struct ReactionRoleRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReactionRoleRepository<'a> {
    /// Creates a new ReactionRoleRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `ReactionRoleRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the binding for an emoji on a message.
    ///
    /// # Arguments
    /// - `message_id` - Discord message ID
    /// - `emoji` - Emoji key (unicode literal or custom emoji id)
    ///
    /// # Returns
    /// - `Ok(Some(ReactionRole))` - Binding exists
    /// - `Ok(None)` - Nothing is bound to this reaction
    /// - `Err(DbErr)` - Database error or unparsable stored id
    pub async fn find(&self, message_id: u64, emoji: &str) -> Result<Option<ReactionRole>, DbErr> {
        let entity = entity::prelude::ReactionRole::find()
            .filter(entity::reaction_role::Column::MessageId.eq(message_id.to_string()))
            .filter(entity::reaction_role::Column::Emoji.eq(emoji))
            .one(self.db)
            .await?;

        entity.map(ReactionRole::from_entity).transpose()
    }

    /// Creates a binding or replaces the role of an existing one.
    ///
    /// Runs as a single insert with an `ON CONFLICT (message_id, emoji)` clause so
    /// concurrent binds of the same reaction cannot produce two rows. A replaced row keeps
    /// its id and creation time and takes the new guild, channel and role.
    ///
    /// # Arguments
    /// - `param` - Guild, channel, message, emoji key and role to bind
    ///
    /// # Returns
    /// - `Ok(ReactionRole)` - The created or updated binding
    /// - `Err(DbErr)` - Database error during upsert operation
    pub async fn upsert(&self, param: UpsertReactionRoleParam) -> Result<ReactionRole, DbErr> {
        let message_id = param.message_id;
        let emoji = param.emoji.clone();

        entity::prelude::ReactionRole::insert(entity::reaction_role::ActiveModel {
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            channel_id: ActiveValue::Set(param.channel_id.to_string()),
            message_id: ActiveValue::Set(param.message_id.to_string()),
            emoji: ActiveValue::Set(param.emoji),
            role_id: ActiveValue::Set(param.role_id.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::columns([
                entity::reaction_role::Column::MessageId,
                entity::reaction_role::Column::Emoji,
            ])
            .update_columns([
                entity::reaction_role::Column::GuildId,
                entity::reaction_role::Column::ChannelId,
                entity::reaction_role::Column::RoleId,
            ])
            .to_owned(),
        )
        .exec_without_returning(self.db)
        .await?;

        self.find(message_id, &emoji).await?.ok_or_else(|| {
            DbErr::RecordNotFound(format!(
                "reaction role for message {} emoji {}",
                message_id, emoji
            ))
        })
    }

    /// Deletes the binding for an emoji on a message.
    ///
    /// # Returns
    /// - `Ok(true)` - A binding was removed
    /// - `Ok(false)` - No binding existed
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete(&self, message_id: u64, emoji: &str) -> Result<bool, DbErr> {
        let result = entity::prelude::ReactionRole::delete_many()
            .filter(entity::reaction_role::Column::MessageId.eq(message_id.to_string()))
            .filter(entity::reaction_role::Column::Emoji.eq(emoji))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Deletes a binding by its row id.
    ///
    /// Used to drop bindings whose role or channel no longer exists.
    pub async fn delete_by_id(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::ReactionRole::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Deletes every binding on a message within a guild.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of bindings removed
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete_by_message(&self, guild_id: u64, message_id: u64) -> Result<u64, DbErr> {
        let result = entity::prelude::ReactionRole::delete_many()
            .filter(entity::reaction_role::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::reaction_role::Column::MessageId.eq(message_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Gets all bindings of a guild ordered by creation.
    ///
    /// # Returns
    /// - `Ok(Vec<ReactionRole>)` - Bindings, oldest first
    /// - `Err(DbErr)` - Database error or unparsable stored id
    pub async fn get_by_guild(&self, guild_id: u64) -> Result<Vec<ReactionRole>, DbErr> {
        let entities = entity::prelude::ReactionRole::find()
            .filter(entity::reaction_role::Column::GuildId.eq(guild_id.to_string()))
            .order_by_asc(entity::reaction_role::Column::Id)
            .all(self.db)
            .await?;

        entities.into_iter().map(ReactionRole::from_entity).collect()
    }
}

#[cfg(test)]
mod test;
