use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LogEvent::Table)
                    .if_not_exists()
                    .col(pk_auto(LogEvent::Id))
                    .col(string(LogEvent::GuildId))
                    .col(string(LogEvent::EventType))
                    .col(string_null(LogEvent::UserId))
                    .col(string_null(LogEvent::ChannelId))
                    .col(string_null(LogEvent::MessageId))
                    .col(text_null(LogEvent::Content))
                    .col(
                        timestamp(LogEvent::Timestamp)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(text_null(LogEvent::AdditionalData))
                    .to_owned(),
            )
            .await?;

        // Retention sweep filters on guild and age
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_log_event_guild_timestamp")
                    .table(LogEvent::Table)
                    .col(LogEvent::GuildId)
                    .col(LogEvent::Timestamp)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_log_event_guild_timestamp")
                    .table(LogEvent::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(LogEvent::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum LogEvent {
    Table,
    Id,
    GuildId,
    EventType,
    UserId,
    ChannelId,
    MessageId,
    Content,
    Timestamp,
    AdditionalData,
}
