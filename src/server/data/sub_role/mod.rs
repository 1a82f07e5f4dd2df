//! Sub-role repository.
//!
//! Tracks which guild roles were created as sub-roles. A registration is unique per
//! (guild, role).

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::sub_role::{CreateSubRoleParam, SubRole};

/// Repository providing database operations for sub-role registrations.
pub struct SubRoleRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SubRoleRepository<'a> {
    /// Creates a new SubRoleRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `SubRoleRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a guild role as a sub-role.
    ///
    /// # Arguments
    /// - `param` - Guild, role id and role name at creation time
    ///
    /// # Returns
    /// - `Ok(SubRole)` - The stored registration
    /// - `Err(DbErr)` - Database error, including a duplicate (guild, role)
    pub async fn create(&self, param: CreateSubRoleParam) -> Result<SubRole, DbErr> {
        let entity = entity::sub_role::ActiveModel {
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            role_id: ActiveValue::Set(param.role_id.to_string()),
            role_name: ActiveValue::Set(param.role_name),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        SubRole::from_entity(entity)
    }

    /// Removes a role's sub-role registration.
    ///
    /// # Returns
    /// - `Ok(true)` - Registration removed
    /// - `Ok(false)` - Role was not registered
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete(&self, guild_id: u64, role_id: u64) -> Result<bool, DbErr> {
        let result = entity::prelude::SubRole::delete_many()
            .filter(entity::sub_role::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::sub_role::Column::RoleId.eq(role_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Gets a guild's registered sub-roles in creation order.
    pub async fn get_by_guild(&self, guild_id: u64) -> Result<Vec<SubRole>, DbErr> {
        let entities = entity::prelude::SubRole::find()
            .filter(entity::sub_role::Column::GuildId.eq(guild_id.to_string()))
            .order_by_asc(entity::sub_role::Column::Id)
            .all(self.db)
            .await?;

        entities.into_iter().map(SubRole::from_entity).collect()
    }

    /// Checks whether a role is registered as a sub-role of the guild.
    pub async fn is_sub_role(&self, guild_id: u64, role_id: u64) -> Result<bool, DbErr> {
        let count = entity::prelude::SubRole::find()
            .filter(entity::sub_role::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::sub_role::Column::RoleId.eq(role_id.to_string()))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }
}

#[cfg(test)]
mod test;
