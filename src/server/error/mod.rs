//! Error types and user-facing error mapping.
//!
//! This module provides the application's error hierarchy. The `AppError` enum is the
//! top-level error type that wraps domain-specific errors. Where a web service would turn
//! errors into HTTP responses, the bot turns them into the short ephemeral text shown to
//! the member who ran a command (see [`AppError::user_message`]).

pub mod config;

use thiserror::Error;

use crate::server::error::config::ConfigError;

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the bot. Most variants use
/// `#[from]` for automatic error conversion. The message-carrying variants (`NotFound`,
/// `BadRequest`, `Forbidden`, `PermissionDenied`, `InvalidConfig`) are shown to users
/// as-is, every other variant is logged and answered with a generic apology.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size. 403 and 404 responses are mapped to `PermissionDenied`
    /// and `NotFound` by the gateway before they reach this variant.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Malformed YAML document.
    #[error(transparent)]
    YamlErr(#[from] serde_yaml::Error),

    /// Failure to serialize a log event payload.
    #[error(transparent)]
    JsonErr(#[from] serde_json::Error),

    /// Filesystem error while reading a configuration or writing a template.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Discord refused the operation because the bot lacks a permission (HTTP 403).
    ///
    /// # Fields
    /// - Description of the refused operation
    #[error("Missing permission: {0}")]
    PermissionDenied(String),

    /// Resource not found error (HTTP 404 or a stale stored reference).
    ///
    /// # Fields
    /// - Message describing what resource was not found
    #[error("{0}")]
    NotFound(String),

    /// Invalid command input.
    ///
    /// # Fields
    /// - Message describing what was invalid about the input
    #[error("{0}")]
    BadRequest(String),

    /// The member running a command lacks the permission it requires.
    ///
    /// # Fields
    /// - Message naming the required permission
    #[error("{0}")]
    Forbidden(String),

    /// Configuration document failed validation.
    ///
    /// # Fields
    /// - Every validation error found in the document
    #[error("Invalid configuration: {}", .0.join("; "))]
    InvalidConfig(Vec<String>),

    /// Internal error with custom message.
    ///
    /// The message is logged but a generic message is shown to the user.
    #[error("{0}")]
    InternalError(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Converts the error into the message shown to the member who triggered it.
    ///
    /// Input and permission errors carry their own descriptive text. Everything else is
    /// logged with full detail and answered with a generic message so that internal
    /// details never reach the guild.
    ///
    /// # Returns
    /// - Text for an ephemeral reply
    pub fn user_message(&self) -> String {
        match self {
            Self::PermissionDenied(msg) => {
                format!("❌ The bot is missing a permission: {}", msg)
            }
            Self::NotFound(msg) | Self::BadRequest(msg) | Self::Forbidden(msg) => {
                format!("❌ {}", msg)
            }
            Self::InvalidConfig(errors) => {
                let mut text = String::from("❌ The configuration is invalid:");
                for error in errors {
                    text.push_str("\n- ");
                    text.push_str(error);
                }
                text
            }
            err => {
                tracing::error!("{}", err);
                "❌ Something went wrong. Please contact an administrator.".to_string()
            }
        }
    }
}
