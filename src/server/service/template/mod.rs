//! Template exporter.
//!
//! Turns the guild's current structure back into a configuration document that
//! `/setup_file` can apply to another guild.

use chrono::Utc;
use sea_orm::DatabaseConnection;
use std::path::{Path, PathBuf};

use crate::server::{
    data::welcome_gate::WelcomeGateRepository,
    error::AppError,
    gateway::GuildGateway,
    model::{
        config::{
            CategorySpec, ChannelKind, ChannelSpec, OverwriteSpec, RoleSpec, ServerConfig,
            WelcomeGateSpec, EVERYONE,
        },
        guild::{ChannelOverwrite, GuildChannelInfo, GuildChannelKind, GuildRole, OverwriteTarget},
        permission::{PermissionKey, PermissionSet},
    },
    util::color::format_color,
};

/// Largest attachment Discord accepts from the bot.
pub const MAX_EXPORT_BYTES: usize = 8 * 1024 * 1024;

/// Category that collects channels without a parent.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Rendered document ready to be attached to a reply.
#[derive(Debug, Clone)]
pub struct TemplateFile {
    pub filename: String,
    pub content: Vec<u8>,
    pub document: ServerConfig,
}

pub struct TemplateService<'a> {
    db: &'a DatabaseConnection,
    gateway: &'a dyn GuildGateway,
}

impl<'a> TemplateService<'a> {
    pub fn new(db: &'a DatabaseConnection, gateway: &'a dyn GuildGateway) -> Self {
        Self { db, gateway }
    }

    /// Builds a configuration document from the guild's current structure.
    ///
    /// Only roles named as core roles in `config` are exported. Categories are kept in
    /// position order and empty categories are dropped. The stored welcome gate is
    /// included when its channel and both roles still exist, and the logging block is
    /// copied from `config` when logging is on.
    ///
    /// # Arguments
    /// - `config` - Active document for the guild
    ///
    /// # Returns
    /// - `Ok(ServerConfig)` - The exported document
    /// - `Err(AppError)` - Gateway or store failure
    pub async fn collect(&self, config: &ServerConfig) -> Result<ServerConfig, AppError> {
        let guild_id = self.gateway.guild_id();
        let server_name = self.gateway.guild_name().await?;

        let mut roles = self.gateway.roles().await?;
        roles.sort_by(|a, b| b.position.cmp(&a.position));

        let role_specs = roles
            .iter()
            .filter(|r| r.id != guild_id && !r.managed && config.is_core_role(&r.name))
            .map(|r| RoleSpec {
                name: r.name.clone(),
                color: (r.color != 0).then(|| format_color(r.color)),
                permission_set: PermissionSet::estimate(r.permissions),
            })
            .collect();

        let mut channels = self.gateway.channels().await?;
        channels.sort_by_key(|c| c.position);

        let mut categories: Vec<CategorySpec> = channels
            .iter()
            .filter(|c| c.kind == GuildChannelKind::Category)
            .map(|category| CategorySpec {
                category: category.name.clone(),
                items: channels
                    .iter()
                    .filter(|c| c.parent_id == Some(category.id))
                    .filter_map(|c| self.channel_spec(c, &roles))
                    .collect(),
            })
            .filter(|category| !category.items.is_empty())
            .collect();

        let uncategorized: Vec<ChannelSpec> = channels
            .iter()
            .filter(|c| c.parent_id.is_none())
            .filter_map(|c| self.channel_spec(c, &roles))
            .collect();
        if !uncategorized.is_empty() {
            categories.push(CategorySpec {
                category: UNCATEGORIZED.to_string(),
                items: uncategorized,
            });
        }

        let welcome_gate = WelcomeGateRepository::new(self.db)
            .get(guild_id)
            .await?
            .and_then(|gate| {
                let channel = channels.iter().find(|c| c.id == gate.channel_id)?;
                let initial_role = roles.iter().find(|r| r.id == gate.initial_role_id)?;
                let final_role = roles.iter().find(|r| r.id == gate.final_role_id)?;

                Some(WelcomeGateSpec {
                    enabled: gate.enabled,
                    channel: channel.name.clone(),
                    initial_role: initial_role.name.clone(),
                    final_role: final_role.name.clone(),
                    message: gate.message_content,
                })
            });

        Ok(ServerConfig {
            server_name,
            roles: role_specs,
            channels: categories,
            welcome_gate,
            logging: config.active_logging().cloned(),
        })
    }

    /// Writes the exported document to `<dir>/<name>.yaml`.
    ///
    /// # Arguments
    /// - `config` - Active document for the guild
    /// - `dir` - Template directory, created when missing
    /// - `name` - File stem, defaults to `<guild>_template_<YYYYmmdd_HHMMSS>` built from
    ///   the guild name with path characters removed
    ///
    /// # Returns
    /// - `Ok((PathBuf, ServerConfig))` - Written path and the exported document
    /// - `Err(AppError::BadRequest)` - The name is not a plain file name
    /// - `Err(AppError::IoErr)` - The file could not be written
    pub async fn save(
        &self,
        config: &ServerConfig,
        dir: &Path,
        name: Option<&str>,
    ) -> Result<(PathBuf, ServerConfig), AppError> {
        let document = self.collect(config).await?;
        let stem = match name {
            Some(name) => checked_name(name)?,
            None => checked_name(&format!(
                "{}_template_{}",
                guild_stem(&document.server_name),
                Utc::now().format("%Y%m%d_%H%M%S")
            ))?,
        };

        let yaml = serde_yaml::to_string(&document)?;
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(format!("{}.yaml", stem));
        tokio::fs::write(&path, yaml).await?;

        tracing::info!("Saved template {}", path.display());

        Ok((path, document))
    }

    /// Renders the exported document as an attachment named `<name>.yaml`.
    ///
    /// # Returns
    /// - `Ok(TemplateFile)` - Attachment contents, default name `<guild>_export`
    /// - `Err(AppError::BadRequest)` - Bad name or the document exceeds the upload limit
    pub async fn export(
        &self,
        config: &ServerConfig,
        name: Option<&str>,
    ) -> Result<TemplateFile, AppError> {
        let document = self.collect(config).await?;
        let stem = match name {
            Some(name) => checked_name(name)?,
            None => checked_name(&format!("{}_export", guild_stem(&document.server_name)))?,
        };

        let content = serde_yaml::to_string(&document)?.into_bytes();
        if content.len() > MAX_EXPORT_BYTES {
            return Err(AppError::BadRequest(
                "The generated template is too large to upload.".to_string(),
            ));
        }

        Ok(TemplateFile {
            filename: format!("{}.yaml", stem),
            content,
            document,
        })
    }

    /// Renders one text or voice channel. Other channel types have no document form.
    fn channel_spec(&self, channel: &GuildChannelInfo, roles: &[GuildRole]) -> Option<ChannelSpec> {
        let kind = match channel.kind {
            GuildChannelKind::Text => ChannelKind::Text,
            GuildChannelKind::Voice => ChannelKind::Voice,
            GuildChannelKind::Category | GuildChannelKind::Other => return None,
        };

        Some(ChannelSpec {
            name: channel.name.clone(),
            kind,
            permissions: channel
                .overwrites
                .iter()
                .filter_map(|o| self.overwrite_spec(o, roles))
                .collect(),
        })
    }

    /// Renders a role overwrite back into key lists. Member overwrites are not exported.
    fn overwrite_spec(
        &self,
        overwrite: &ChannelOverwrite,
        roles: &[GuildRole],
    ) -> Option<OverwriteSpec> {
        let OverwriteTarget::Role(role_id) = overwrite.target else {
            return None;
        };

        let role = if role_id == self.gateway.guild_id() {
            EVERYONE.to_string()
        } else {
            roles.iter().find(|r| r.id == role_id)?.name.clone()
        };

        let allow = PermissionKey::from_permissions(overwrite.allow);
        let deny = PermissionKey::from_permissions(overwrite.deny);
        if allow.is_empty() && deny.is_empty() {
            return None;
        }

        Some(OverwriteSpec { role, allow, deny })
    }
}

/// Makes a guild name usable as the start of a file name.
///
/// Path separators and control characters become `_` and leading dots are dropped, so
/// a guild named `../x` yields `_x`. An empty result becomes `guild`.
fn guild_stem(server_name: &str) -> String {
    let replaced: String = server_name
        .chars()
        .map(|c| if matches!(c, '/' | '\\') || c.is_control() { '_' } else { c })
        .collect();
    let stem = replaced.trim().trim_start_matches('.');

    if stem.is_empty() {
        "guild".to_string()
    } else {
        stem.to_string()
    }
}

/// Accepts a template name only if it cannot escape the template directory.
fn checked_name(name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
        return Err(AppError::BadRequest(format!(
            "`{}` is not a valid template name.",
            name
        )));
    }

    Ok(name.to_string())
}

#[cfg(test)]
mod test;
