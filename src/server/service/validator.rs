//! Configuration document validation.
//!
//! Works on the raw YAML value so that every problem in a document is reported at once,
//! instead of stopping at the first field serde cannot deserialize. Positions in error
//! messages are 1-based.

use serde_yaml::{Mapping, Value};
use std::str::FromStr;

use crate::server::{
    error::AppError,
    model::{
        config::ServerConfig,
        log_event::EventType,
        permission::{PermissionKey, PermissionSet},
    },
    util::{color::parse_color, name::validate_role_name},
};

const REQUIRED_KEYS: [&str; 3] = ["server_name", "roles", "channels"];
const WELCOME_GATE_TEXT_KEYS: [&str; 4] = ["channel", "initial_role", "final_role", "message"];
/// Longest retention window accepted, about a century.
const MAX_AUTO_DELETE_DAYS: i64 = 36500;

/// Outcome of validating a configuration document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn push(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }
}

/// Validates a parsed configuration document, accumulating every violation.
pub fn validate(document: &Value) -> ValidationReport {
    let mut report = ValidationReport::default();

    let Some(root) = document.as_mapping() else {
        report.push("Configuration must be a mapping of keys to values");
        return report;
    };

    for key in REQUIRED_KEYS {
        if root.get(key).is_none() {
            report.push(format!("Missing required key '{}'", key));
        }
    }

    if let Some(name) = root.get("server_name") {
        if !name.is_string() {
            report.push("'server_name' must be text");
        }
    }

    if let Some(roles) = root.get("roles") {
        validate_roles(roles, &mut report);
    }
    if let Some(channels) = root.get("channels") {
        validate_channels(channels, &mut report);
    }
    if let Some(welcome_gate) = root.get("welcome_gate") {
        validate_welcome_gate(welcome_gate, &mut report);
    }
    if let Some(logging) = root.get("logging") {
        validate_logging(logging, &mut report);
    }

    report
}

/// Parses and validates a YAML document into a configuration.
///
/// # Returns
/// - `Ok(ServerConfig)` - The document is valid
/// - `Err(AppError::InvalidConfig)` - The text is not YAML, or every validation error found
pub fn parse_config(text: &str) -> Result<ServerConfig, AppError> {
    let document: Value = serde_yaml::from_str(text)
        .map_err(|e| AppError::InvalidConfig(vec![format!("Not valid YAML: {}", e)]))?;

    let report = validate(&document);
    if !report.is_valid() {
        return Err(AppError::InvalidConfig(report.errors));
    }

    serde_yaml::from_value(document).map_err(|e| AppError::InvalidConfig(vec![e.to_string()]))
}

fn validate_roles(roles: &Value, report: &mut ValidationReport) {
    let Some(roles) = roles.as_sequence() else {
        report.push("'roles' must be a list");
        return;
    };

    for (index, role) in roles.iter().enumerate() {
        let position = index + 1;
        let Some(role) = role.as_mapping() else {
            report.push(format!("Role {} must be a mapping", position));
            continue;
        };

        match role.get("name") {
            None => report.push(format!("Role {} is missing 'name'", position)),
            Some(Value::String(name)) => {
                if let Err(reason) = validate_role_name(name) {
                    report.push(format!("Role {}: {}", position, reason));
                }
            }
            Some(_) => report.push(format!("Role {}: 'name' must be text", position)),
        }

        match role.get("permission_set") {
            None => report.push(format!("Role {} is missing 'permission_set'", position)),
            Some(value) => {
                let known = value
                    .as_str()
                    .is_some_and(|set| PermissionSet::from_str(set).is_ok());
                if !known {
                    report.push(format!(
                        "Role {}: unknown permission_set {}",
                        position,
                        describe(value)
                    ));
                }
            }
        }

        if let Some(color) = role.get("color") {
            let valid = color.as_str().is_some_and(|c| parse_color(c).is_some());
            if !valid {
                report.push(format!(
                    "Role {}: invalid color {} (use #RRGGBB, #RGB or a color name)",
                    position,
                    describe(color)
                ));
            }
        }
    }
}

fn validate_channels(channels: &Value, report: &mut ValidationReport) {
    let Some(categories) = channels.as_sequence() else {
        report.push("'channels' must be a list");
        return;
    };

    for (index, category) in categories.iter().enumerate() {
        let position = index + 1;
        let Some(category) = category.as_mapping() else {
            report.push(format!("Category {} must be a mapping", position));
            continue;
        };

        match category.get("category") {
            None => report.push(format!("Category {} is missing 'category'", position)),
            Some(Value::String(_)) => {}
            Some(_) => report.push(format!("Category {}: 'category' must be text", position)),
        }

        let Some(items) = category.get("items") else {
            report.push(format!("Category {} is missing 'items'", position));
            continue;
        };
        let Some(items) = items.as_sequence() else {
            report.push(format!("Category {}: 'items' must be a list", position));
            continue;
        };

        for (item_index, item) in items.iter().enumerate() {
            let label = format!("Channel {}-{}", position, item_index + 1);
            match item.as_mapping() {
                Some(item) => validate_channel_item(&label, item, report),
                None => report.push(format!("{} must be a mapping", label)),
            }
        }
    }
}

fn validate_channel_item(label: &str, item: &Mapping, report: &mut ValidationReport) {
    match item.get("name") {
        None => report.push(format!("{} is missing 'name'", label)),
        Some(Value::String(_)) => {}
        Some(_) => report.push(format!("{}: 'name' must be text", label)),
    }

    if let Some(kind) = item.get("type") {
        if !matches!(kind.as_str(), Some("text") | Some("voice")) {
            report.push(format!("{}: invalid type {}", label, describe(kind)));
        }
    }

    let Some(permissions) = item.get("permissions") else {
        return;
    };
    let Some(permissions) = permissions.as_sequence() else {
        report.push(format!("{}: 'permissions' must be a list", label));
        return;
    };

    for (index, overwrite) in permissions.iter().enumerate() {
        let overwrite_label = format!("{} permission {}", label, index + 1);
        let Some(overwrite) = overwrite.as_mapping() else {
            report.push(format!("{} must be a mapping", overwrite_label));
            continue;
        };

        match overwrite.get("role") {
            None => report.push(format!("{} is missing 'role'", overwrite_label)),
            Some(Value::String(_)) => {}
            Some(_) => report.push(format!("{}: 'role' must be text", overwrite_label)),
        }

        for direction in ["allow", "deny"] {
            let Some(keys) = overwrite.get(direction) else {
                continue;
            };
            let Some(keys) = keys.as_sequence() else {
                report.push(format!("{}: '{}' must be a list", overwrite_label, direction));
                continue;
            };
            for key in keys {
                let known = key
                    .as_str()
                    .is_some_and(|k| PermissionKey::from_str(k).is_ok());
                if !known {
                    report.push(format!(
                        "{}: unknown permission {}",
                        overwrite_label,
                        describe(key)
                    ));
                }
            }
        }
    }
}

fn validate_welcome_gate(welcome_gate: &Value, report: &mut ValidationReport) {
    let Some(welcome_gate) = welcome_gate.as_mapping() else {
        report.push("'welcome_gate' must be a mapping");
        return;
    };

    match welcome_gate.get("enabled") {
        None => report.push("'welcome_gate' is missing 'enabled'"),
        Some(Value::Bool(_)) => {}
        Some(_) => report.push("'welcome_gate.enabled' must be true or false"),
    }

    for key in WELCOME_GATE_TEXT_KEYS {
        match welcome_gate.get(key) {
            None => report.push(format!("'welcome_gate' is missing '{}'", key)),
            Some(Value::String(_)) => {}
            Some(_) => report.push(format!("'welcome_gate.{}' must be text", key)),
        }
    }
}

fn validate_logging(logging: &Value, report: &mut ValidationReport) {
    let Some(logging) = logging.as_mapping() else {
        report.push("'logging' must be a mapping");
        return;
    };

    if let Some(enabled) = logging.get("enabled") {
        if !enabled.is_bool() {
            report.push("'logging.enabled' must be true or false");
        }
    }

    if let Some(channel) = logging.get("log_channel") {
        if !matches!(channel, Value::String(_) | Value::Null) {
            report.push("'logging.log_channel' must be text");
        }
    }

    if let Some(days) = logging.get("auto_delete_days") {
        match days.as_i64() {
            Some(days) if (0..=MAX_AUTO_DELETE_DAYS).contains(&days) => {}
            Some(days) if days < 0 => {
                report.push("'logging.auto_delete_days' must be 0 or greater")
            }
            Some(_) => report.push(format!(
                "'logging.auto_delete_days' must be at most {}",
                MAX_AUTO_DELETE_DAYS
            )),
            None => report.push("'logging.auto_delete_days' must be a whole number"),
        }
    }

    if let Some(events) = logging.get("events") {
        match events.as_sequence() {
            Some(events) => {
                for event in events {
                    let known = event
                        .as_str()
                        .is_some_and(|e| EventType::from_str(e).is_ok());
                    if !known {
                        report.push(format!("'logging.events': unknown event {}", describe(event)));
                    }
                }
            }
            None => report.push("'logging.events' must be a list"),
        }
    }
}

/// Renders a YAML scalar for an error message.
fn describe(value: &Value) -> String {
    match value {
        Value::String(text) => format!("'{}'", text),
        Value::Null => "(empty)".to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|_| "(unreadable)".to_string()),
    }
}
