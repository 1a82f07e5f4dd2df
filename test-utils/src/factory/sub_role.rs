//! Sub-role factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating sub-role registrations.
pub struct SubRoleFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: u64,
    role_id: u64,
    role_name: String,
}

impl<'a> SubRoleFactory<'a> {
    /// Defaults to a unique role id named `Sub Role {id}`.
    pub fn new(db: &'a DatabaseConnection, guild_id: u64) -> Self {
        let id = next_id();
        Self {
            db,
            guild_id,
            role_id: id,
            role_name: format!("Sub Role {}", id),
        }
    }

    pub fn role_id(mut self, role_id: u64) -> Self {
        self.role_id = role_id;
        self
    }

    pub fn role_name(mut self, role_name: impl Into<String>) -> Self {
        self.role_name = role_name.into();
        self
    }

    pub async fn build(self) -> Result<entity::sub_role::Model, DbErr> {
        entity::sub_role::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id.to_string()),
            role_id: ActiveValue::Set(self.role_id.to_string()),
            role_name: ActiveValue::Set(self.role_name),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a sub-role registration with default values.
pub async fn create_sub_role(
    db: &DatabaseConnection,
    guild_id: u64,
) -> Result<entity::sub_role::Model, DbErr> {
    SubRoleFactory::new(db, guild_id).build().await
}
