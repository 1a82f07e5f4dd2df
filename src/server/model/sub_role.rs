//! Domain models for sub-roles.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

/// Role created through `/role create`: no permissions, deletable and reaction-bindable.
#[derive(Debug, Clone, PartialEq)]
pub struct SubRole {
    pub id: i32,
    pub guild_id: u64,
    pub role_id: u64,
    pub role_name: String,
    pub created_at: DateTime<Utc>,
}

impl SubRole {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(SubRole)` - Successfully converted domain model
    /// - `Err(DbErr::Custom)` - A stored id failed to parse as u64
    pub fn from_entity(entity: entity::sub_role::Model) -> Result<Self, DbErr> {
        let guild_id = entity
            .guild_id
            .parse::<u64>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse guild_id: {}", e)))?;
        let role_id = entity
            .role_id
            .parse::<u64>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse role_id: {}", e)))?;

        Ok(Self {
            id: entity.id,
            guild_id,
            role_id,
            role_name: entity.role_name,
            created_at: entity.created_at,
        })
    }
}

/// Parameters for registering a sub-role.
#[derive(Debug, Clone)]
pub struct CreateSubRoleParam {
    pub guild_id: u64,
    pub role_id: u64,
    pub role_name: String,
}
