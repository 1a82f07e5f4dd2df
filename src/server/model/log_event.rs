//! Domain models for recorded audit events.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Category of a recorded event.
///
/// Stored as its snake_case name in the `event_type` column and used in the
/// `logging.events` allow-list of the configuration document.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EventType {
    MessageDelete,
    MessageEdit,
    MemberJoin,
    MemberLeave,
    MemberUpdate,
    RoleUpdate,
    WelcomeGateAgree,
}

/// Immutable audit record.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEvent {
    pub id: i32,
    pub guild_id: u64,
    /// Stored event type name. Kept as a string so rows written by older builds still load.
    pub event_type: String,
    pub user_id: Option<u64>,
    pub channel_id: Option<u64>,
    pub message_id: Option<u64>,
    pub content: Option<String>,
    pub timestamp: DateTime<Utc>,
    /// Opaque JSON text with before/after details.
    pub additional_data: Option<String>,
}

impl LogEvent {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The database entity model to convert
    ///
    /// # Returns
    /// - `Ok(LogEvent)` - Successfully converted domain model
    /// - `Err(DbErr::Custom)` - A stored id failed to parse as u64
    pub fn from_entity(entity: entity::log_event::Model) -> Result<Self, DbErr> {
        let guild_id = entity
            .guild_id
            .parse::<u64>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse guild_id: {}", e)))?;

        Ok(Self {
            id: entity.id,
            guild_id,
            event_type: entity.event_type,
            user_id: parse_optional_id(entity.user_id, "user_id")?,
            channel_id: parse_optional_id(entity.channel_id, "channel_id")?,
            message_id: parse_optional_id(entity.message_id, "message_id")?,
            content: entity.content,
            timestamp: entity.timestamp,
            additional_data: entity.additional_data,
        })
    }
}

fn parse_optional_id(value: Option<String>, column: &str) -> Result<Option<u64>, DbErr> {
    value
        .map(|v| {
            v.parse::<u64>()
                .map_err(|e| DbErr::Custom(format!("Failed to parse {}: {}", column, e)))
        })
        .transpose()
}

/// Parameters for appending an audit record.
#[derive(Debug, Clone)]
pub struct CreateLogEventParam {
    pub guild_id: u64,
    pub event_type: EventType,
    pub user_id: Option<u64>,
    pub channel_id: Option<u64>,
    pub message_id: Option<u64>,
    pub content: Option<String>,
    pub additional_data: Option<serde_json::Value>,
}

impl CreateLogEventParam {
    /// Creates parameters with only the guild and type set.
    pub fn new(guild_id: u64, event_type: EventType) -> Self {
        Self {
            guild_id,
            event_type,
            user_id: None,
            channel_id: None,
            message_id: None,
            content: None,
            additional_data: None,
        }
    }
}

/// Embed posted to the log channel for a recorded event.
///
/// Built by the event logger and rendered into a Discord embed by the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct LogNotice {
    pub title: String,
    pub color: u32,
    pub description: Option<String>,
    /// `(name, value, inline)` triples in display order.
    pub fields: Vec<(String, String, bool)>,
    pub thumbnail: Option<String>,
}

impl LogNotice {
    pub fn new(title: impl Into<String>, color: u32) -> Self {
        Self {
            title: title.into(),
            color,
            description: None,
            fields: Vec::new(),
            thumbnail: None,
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push((name.into(), value.into(), inline));
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail = Some(url.into());
        self
    }
}
