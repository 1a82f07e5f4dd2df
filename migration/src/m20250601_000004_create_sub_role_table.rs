use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SubRole::Table)
                    .if_not_exists()
                    .col(pk_auto(SubRole::Id))
                    .col(string(SubRole::GuildId))
                    .col(string(SubRole::RoleId))
                    .col(string(SubRole::RoleName))
                    .col(
                        timestamp(SubRole::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_sub_role_guild_role")
                    .table(SubRole::Table)
                    .col(SubRole::GuildId)
                    .col(SubRole::RoleId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_sub_role_guild_role")
                    .table(SubRole::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(SubRole::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum SubRole {
    Table,
    Id,
    GuildId,
    RoleId,
    RoleName,
    CreatedAt,
}
