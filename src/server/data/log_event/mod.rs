//! Audit event repository.
//!
//! Rows are append-only. The only deletion path is the retention sweep, which removes a
//! guild's rows older than a cutoff.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use crate::server::{
    model::log_event::{CreateLogEventParam, LogEvent},
    util::name::truncate,
};

/// Longest message content kept in a row.
pub const MAX_STORED_CONTENT: usize = 2000;

/// Repository providing database operations for audit events.
pub struct LogEventRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LogEventRepository<'a> {
    /// Creates a new LogEventRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `LogEventRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Appends an audit event stamped with the current time.
    ///
    /// Content longer than [`MAX_STORED_CONTENT`] characters is truncated and the
    /// additional data is stored as JSON text.
    ///
    /// # Arguments
    /// - `param` - Event type, subject ids, content and before/after details
    ///
    /// # Returns
    /// - `Ok(LogEvent)` - The stored event with generated ID
    /// - `Err(DbErr)` - Database error during insert operation
    pub async fn create(&self, param: CreateLogEventParam) -> Result<LogEvent, DbErr> {
        let entity = entity::log_event::ActiveModel {
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            event_type: ActiveValue::Set(param.event_type.to_string()),
            user_id: ActiveValue::Set(param.user_id.map(|id| id.to_string())),
            channel_id: ActiveValue::Set(param.channel_id.map(|id| id.to_string())),
            message_id: ActiveValue::Set(param.message_id.map(|id| id.to_string())),
            content: ActiveValue::Set(
                param
                    .content
                    .map(|content| truncate(&content, MAX_STORED_CONTENT)),
            ),
            timestamp: ActiveValue::Set(Utc::now()),
            additional_data: ActiveValue::Set(param.additional_data.map(|data| data.to_string())),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        LogEvent::from_entity(entity)
    }

    /// Deletes a guild's events recorded strictly before `cutoff`.
    ///
    /// # Arguments
    /// - `guild_id` - Guild whose history is swept
    /// - `cutoff` - Events older than this instant are removed
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of events removed
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete_older_than(
        &self,
        guild_id: u64,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::LogEvent::delete_many()
            .filter(entity::log_event::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::log_event::Column::Timestamp.lt(cutoff))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod test;
