//! Sub-role management.
//!
//! Sub-roles are permissionless roles created on demand by moderators. Unlike core roles
//! they can be deleted and bound to reactions.

use sea_orm::DatabaseConnection;
use serenity::all::Permissions;

use crate::server::{
    data::sub_role::SubRoleRepository,
    error::AppError,
    gateway::GuildGateway,
    model::{
        config::ServerConfig,
        guild::{GuildRole, NewRole},
        permission::PermissionSet,
        sub_role::CreateSubRoleParam,
    },
    util::{color::parse_color, name::validate_role_name},
};

/// Permissions called out by `/role info`, in display order.
const NOTABLE_PERMISSIONS: [(Permissions, &str); 6] = [
    (Permissions::MANAGE_MESSAGES, "Manage Messages"),
    (Permissions::MANAGE_ROLES, "Manage Roles"),
    (Permissions::MANAGE_CHANNELS, "Manage Channels"),
    (Permissions::KICK_MEMBERS, "Kick Members"),
    (Permissions::BAN_MEMBERS, "Ban Members"),
    (Permissions::VIEW_AUDIT_LOG, "View Audit Log"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleKind {
    Core,
    Sub,
    Other,
}

impl RoleKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Core => "🔹 Core role",
            Self::Sub => "🔸 Sub-role",
            Self::Other => "❓ Other",
        }
    }
}

/// Details shown by `/role info`.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleInfo {
    pub role: GuildRole,
    pub kind: RoleKind,
    /// `["Administrator"]` for administrators, otherwise the notable permissions held.
    pub notable_permissions: Vec<&'static str>,
}

pub struct SubRoleService<'a> {
    db: &'a DatabaseConnection,
    gateway: &'a dyn GuildGateway,
}

impl<'a> SubRoleService<'a> {
    pub fn new(db: &'a DatabaseConnection, gateway: &'a dyn GuildGateway) -> Self {
        Self { db, gateway }
    }

    /// Creates a permissionless role and registers it as a sub-role.
    ///
    /// # Arguments
    /// - `config` - Active document, used to reject core role names
    /// - `name` - Name of the new role
    /// - `color` - Optional `#RRGGBB`, `#RGB` or color name
    ///
    /// # Returns
    /// - `Ok(GuildRole)` - The created role
    /// - `Err(AppError::BadRequest)` - Invalid or taken name, core role name, bad color
    /// - `Err(AppError::PermissionDenied)` - The bot cannot create roles
    pub async fn create(
        &self,
        config: &ServerConfig,
        name: &str,
        color: Option<&str>,
    ) -> Result<GuildRole, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::BadRequest("A role name is required.".to_string()));
        }
        validate_role_name(name).map_err(|e| AppError::BadRequest(format!("Invalid {}.", e)))?;

        if config.is_core_role(name) {
            return Err(AppError::BadRequest(format!(
                "`{}` is a core role name and cannot be used for a sub-role.",
                name
            )));
        }

        let roles = self.gateway.roles().await?;
        if roles.iter().any(|r| r.name == name) {
            return Err(AppError::BadRequest(format!(
                "A role named `{}` already exists.",
                name
            )));
        }

        let color = match color {
            Some(input) => Some(parse_color(input).ok_or_else(|| {
                AppError::BadRequest(format!("`{}` is not a valid color.", input))
            })?),
            None => None,
        };

        let role = self
            .gateway
            .create_role(NewRole {
                name: name.to_string(),
                color,
                permissions: PermissionSet::Subrole.permissions(),
            })
            .await?;

        SubRoleRepository::new(self.db)
            .create(CreateSubRoleParam {
                guild_id: self.gateway.guild_id(),
                role_id: role.id,
                role_name: role.name.clone(),
            })
            .await?;

        tracing::info!(
            "Created sub-role {} in guild {}",
            role.name,
            self.gateway.guild_id()
        );

        Ok(role)
    }

    /// Deletes a role through the sub-role path.
    ///
    /// Core roles are refused unless they were registered as sub-roles.
    ///
    /// # Returns
    /// - `Ok(())` - The role and its registration are gone
    /// - `Err(AppError::BadRequest)` - The role is a core role
    /// - `Err(AppError::PermissionDenied)` - The bot cannot delete the role
    pub async fn delete(&self, config: &ServerConfig, role: &GuildRole) -> Result<(), AppError> {
        let guild_id = self.gateway.guild_id();
        let repo = SubRoleRepository::new(self.db);

        let is_sub_role = repo.is_sub_role(guild_id, role.id).await?;
        if !is_sub_role && config.is_core_role(&role.name) {
            return Err(AppError::BadRequest(format!(
                "`{}` is a core role and cannot be deleted.",
                role.name
            )));
        }

        self.gateway.delete_role(role.id).await?;
        repo.delete(guild_id, role.id).await?;

        tracing::info!("Deleted sub-role {} in guild {}", role.name, guild_id);

        Ok(())
    }

    /// Lists registered sub-roles that still exist, highest position first.
    ///
    /// Registrations whose role was deleted outside the bot are removed.
    pub async fn list(&self) -> Result<Vec<GuildRole>, AppError> {
        let guild_id = self.gateway.guild_id();
        let repo = SubRoleRepository::new(self.db);

        let registered = repo.get_by_guild(guild_id).await?;
        if registered.is_empty() {
            return Ok(Vec::new());
        }

        let roles = self.gateway.roles().await?;
        let mut valid = Vec::with_capacity(registered.len());

        for sub_role in registered {
            match roles.iter().find(|r| r.id == sub_role.role_id) {
                Some(role) => valid.push(role.clone()),
                None => {
                    tracing::info!(
                        "Removing sub-role {} whose role no longer exists",
                        sub_role.role_name
                    );
                    repo.delete(guild_id, sub_role.role_id).await?;
                }
            }
        }

        valid.sort_by(|a, b| b.position.cmp(&a.position));

        Ok(valid)
    }

    /// Describes a role and how the bot classifies it.
    pub async fn info(&self, config: &ServerConfig, role: &GuildRole) -> Result<RoleInfo, AppError> {
        let kind = if config.is_core_role(&role.name) {
            RoleKind::Core
        } else if SubRoleRepository::new(self.db)
            .is_sub_role(self.gateway.guild_id(), role.id)
            .await?
        {
            RoleKind::Sub
        } else {
            RoleKind::Other
        };

        let notable_permissions = if role.permissions.contains(Permissions::ADMINISTRATOR) {
            vec!["Administrator"]
        } else {
            NOTABLE_PERMISSIONS
                .iter()
                .filter(|(bit, _)| role.permissions.contains(*bit))
                .map(|(_, label)| *label)
                .collect()
        };

        Ok(RoleInfo {
            role: role.clone(),
            kind,
            notable_permissions,
        })
    }
}

#[cfg(test)]
mod test;
