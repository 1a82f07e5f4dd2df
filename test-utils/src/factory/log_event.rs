//! Audit event factory.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating audit event rows.
///
/// The timestamp is settable so retention tests can create aged rows.
///
/// # Example
///
/// ```rust,ignore
/// let old = LogEventFactory::new(&db, guild_id)
///     .timestamp(Utc::now() - Duration::days(10))
///     .build()
///     .await?;
/// ```
pub struct LogEventFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: u64,
    event_type: String,
    user_id: Option<u64>,
    content: Option<String>,
    timestamp: DateTime<Utc>,
}

impl<'a> LogEventFactory<'a> {
    /// Defaults to a `message_delete` event stamped now.
    pub fn new(db: &'a DatabaseConnection, guild_id: u64) -> Self {
        Self {
            db,
            guild_id,
            event_type: "message_delete".to_string(),
            user_id: None,
            content: None,
            timestamp: Utc::now(),
        }
    }

    pub fn event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = event_type.into();
        self
    }

    pub fn user_id(mut self, user_id: u64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub async fn build(self) -> Result<entity::log_event::Model, DbErr> {
        entity::log_event::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id.to_string()),
            event_type: ActiveValue::Set(self.event_type),
            user_id: ActiveValue::Set(self.user_id.map(|id| id.to_string())),
            channel_id: ActiveValue::Set(None),
            message_id: ActiveValue::Set(None),
            content: ActiveValue::Set(self.content),
            timestamp: ActiveValue::Set(self.timestamp),
            additional_data: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a `message_delete` event stamped now.
pub async fn create_log_event(
    db: &DatabaseConnection,
    guild_id: u64,
) -> Result<entity::log_event::Model, DbErr> {
    LogEventFactory::new(db, guild_id).build().await
}
