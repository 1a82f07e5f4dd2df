use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WelcomeGate::Table)
                    .if_not_exists()
                    .col(string(WelcomeGate::GuildId).primary_key())
                    .col(string(WelcomeGate::ChannelId))
                    .col(string_null(WelcomeGate::MessageId))
                    .col(string(WelcomeGate::InitialRoleId))
                    .col(string(WelcomeGate::FinalRoleId))
                    .col(text(WelcomeGate::MessageContent))
                    .col(boolean(WelcomeGate::Enabled).default(true))
                    .col(
                        timestamp(WelcomeGate::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WelcomeGate::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum WelcomeGate {
    Table,
    GuildId,
    ChannelId,
    MessageId,
    InitialRoleId,
    FinalRoleId,
    MessageContent,
    Enabled,
    CreatedAt,
}
