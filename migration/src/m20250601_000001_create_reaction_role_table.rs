use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ReactionRole::Table)
                    .if_not_exists()
                    .col(pk_auto(ReactionRole::Id))
                    .col(string(ReactionRole::GuildId))
                    .col(string(ReactionRole::ChannelId))
                    .col(string(ReactionRole::MessageId))
                    .col(string(ReactionRole::Emoji))
                    .col(string(ReactionRole::RoleId))
                    .col(
                        timestamp(ReactionRole::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // One role per emoji per message
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_reaction_role_message_emoji")
                    .table(ReactionRole::Table)
                    .col(ReactionRole::MessageId)
                    .col(ReactionRole::Emoji)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_reaction_role_guild_id")
                    .table(ReactionRole::Table)
                    .col(ReactionRole::GuildId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_reaction_role_guild_id")
                    .table(ReactionRole::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_reaction_role_message_emoji")
                    .table(ReactionRole::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ReactionRole::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ReactionRole {
    Table,
    Id,
    GuildId,
    ChannelId,
    MessageId,
    Emoji,
    RoleId,
    CreatedAt,
}
