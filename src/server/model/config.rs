//! Server configuration document.
//!
//! The document declares the guild structure the bot provisions (roles, categories and
//! channels), the welcome gate and the event-logging policy. It is read from YAML at
//! startup, can be replaced per guild with `/setup_file`, and is produced again by the
//! template exporter. Parsing goes through the validator first, see
//! [`crate::server::service::validator::parse_config`].

use serde::{Deserialize, Serialize};

use crate::server::model::{
    log_event::EventType,
    permission::{PermissionKey, PermissionSet},
};

/// Name of the built-in role every member holds.
pub const EVERYONE: &str = "@everyone";

/// Days of log history kept when the document does not say otherwise.
pub const DEFAULT_AUTO_DELETE_DAYS: i64 = 7;

/// Complete configuration document for one guild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub server_name: String,
    #[serde(default)]
    pub roles: Vec<RoleSpec>,
    #[serde(default)]
    pub channels: Vec<CategorySpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub welcome_gate: Option<WelcomeGateSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingSpec>,
}

/// Core role declared by the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleSpec {
    pub name: String,
    /// `#RRGGBB`, `#RGB` or a color name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub permission_set: PermissionSet,
}

/// Category and the channels provisioned inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpec {
    pub category: String,
    #[serde(default)]
    pub items: Vec<ChannelSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSpec {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: ChannelKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<OverwriteSpec>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    #[default]
    Text,
    Voice,
}

/// Permission overwrite applied to a channel when it is created.
///
/// `role` is a role name or `@everyone`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverwriteSpec {
    pub role: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allow: Vec<PermissionKey>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deny: Vec<PermissionKey>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WelcomeGateSpec {
    pub enabled: bool,
    pub channel: String,
    pub initial_role: String,
    pub final_role: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSpec {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_channel: Option<String>,
    #[serde(default)]
    pub events: Vec<EventType>,
    #[serde(default = "default_auto_delete_days")]
    pub auto_delete_days: i64,
}

fn default_auto_delete_days() -> i64 {
    DEFAULT_AUTO_DELETE_DAYS
}

impl ServerConfig {
    /// Returns true if `name` is one of the document's core roles.
    pub fn is_core_role(&self, name: &str) -> bool {
        self.roles.iter().any(|role| role.name == name)
    }

    /// Returns the logging block when logging is switched on.
    pub fn active_logging(&self) -> Option<&LoggingSpec> {
        self.logging.as_ref().filter(|logging| logging.enabled)
    }

    /// Returns true if events of `event_type` should be recorded.
    pub fn logs_event(&self, event_type: EventType) -> bool {
        self.active_logging()
            .is_some_and(|logging| logging.events.contains(&event_type))
    }

    /// Returns the retention window in days, or `None` when the sweep is off for the guild.
    pub fn retention_days(&self) -> Option<i64> {
        self.active_logging()
            .map(|logging| logging.auto_delete_days)
            .filter(|days| *days > 0)
    }
}
