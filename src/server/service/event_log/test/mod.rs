use super::*;
use crate::server::{
    data::log_event::MAX_STORED_CONTENT,
    gateway::fake::FakeGateway,
    model::config::LoggingSpec,
};
use entity::prelude::LogEvent as LogEventEntity;
use sea_orm::{EntityTrait, PaginatorTrait};
use serenity::all::Permissions;
use test_utils::builder::TestBuilder;

mod record;

fn config(events: Vec<EventType>, log_channel: Option<&str>) -> ServerConfig {
    ServerConfig {
        server_name: "Test Server".to_string(),
        roles: Vec::new(),
        channels: Vec::new(),
        welcome_gate: None,
        logging: Some(LoggingSpec {
            enabled: true,
            log_channel: log_channel.map(str::to_string),
            events,
            auto_delete_days: 7,
        }),
    }
}

fn user() -> UserRef {
    UserRef {
        id: 42,
        name: "alice".to_string(),
        display_name: "Alice".to_string(),
        avatar_url: None,
    }
}

fn deleted_message(content: &str) -> DeletedMessage {
    DeletedMessage {
        author: user(),
        channel_id: 7,
        message_id: 8,
        content: content.to_string(),
        attachments: vec!["cat.png".to_string()],
        embeds: 0,
    }
}

fn guild_role(name: &str, color: u32, permissions: Permissions) -> GuildRole {
    GuildRole {
        id: 9,
        name: name.to_string(),
        color,
        position: 1,
        permissions,
        managed: false,
        hoist: false,
        mentionable: false,
    }
}
