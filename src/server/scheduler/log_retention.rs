use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;
use serenity::cache::Cache;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{config::ConfigStore, data::log_event::LogEventRepository, error::AppError};

/// Starts the log retention sweep.
///
/// The sweep runs every `interval_hours` hours over every guild currently in the cache and
/// deletes events older than each guild's `auto_delete_days`. The first pass happens one
/// interval after startup.
///
/// # Arguments
/// - `db`: Database connection
/// - `configs`: Per-guild configuration documents
/// - `cache`: Gateway cache listing the guilds the bot is in
/// - `interval_hours`: Hours between passes
pub async fn start_scheduler(
    db: DatabaseConnection,
    configs: Arc<ConfigStore>,
    cache: Arc<Cache>,
    interval_hours: u64,
) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;
    let period = std::time::Duration::from_secs(interval_hours.max(1) * 60 * 60);

    let job = Job::new_repeated_async(period, move |_uuid, _lock| {
        let db = db.clone();
        let configs = configs.clone();
        let guild_ids: Vec<u64> = cache.guilds().iter().map(|id| id.get()).collect();

        Box::pin(async move {
            let removed = sweep(&db, &configs, &guild_ids, Utc::now()).await;
            if removed > 0 {
                tracing::info!("Log retention removed {} events", removed);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!(
        "Log retention scheduler started, running every {} hours",
        interval_hours.max(1)
    );

    Ok(())
}

/// Runs one retention pass and returns the number of events deleted.
///
/// Guilds whose logging is off, or whose window is zero or negative, are skipped. A
/// failure in one guild is logged and the pass moves on.
pub async fn sweep(
    db: &DatabaseConnection,
    configs: &ConfigStore,
    guild_ids: &[u64],
    now: DateTime<Utc>,
) -> u64 {
    let repo = LogEventRepository::new(db);
    let mut total = 0;

    for &guild_id in guild_ids {
        let Some(days) = configs.for_guild(guild_id).retention_days() else {
            continue;
        };

        let Some(cutoff) = Duration::try_days(days).and_then(|age| now.checked_sub_signed(age))
        else {
            tracing::warn!(
                "Skipping log retention for guild {}: {} days is out of range",
                guild_id,
                days
            );
            continue;
        };

        match repo.delete_older_than(guild_id, cutoff).await {
            Ok(0) => {}
            Ok(removed) => {
                tracing::info!(
                    "Removed {} log events older than {} days from guild {}",
                    removed,
                    days,
                    guild_id
                );
                total += removed;
            }
            Err(e) => {
                tracing::error!("Log retention failed for guild {}: {}", guild_id, e);
            }
        }
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::model::config::{LoggingSpec, ServerConfig};
    use entity::prelude::LogEvent;
    use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
    use test_utils::{builder::TestBuilder, factory::log_event::LogEventFactory};

    fn config(enabled: bool, auto_delete_days: i64) -> ServerConfig {
        ServerConfig {
            server_name: "Test".to_string(),
            roles: Vec::new(),
            channels: Vec::new(),
            welcome_gate: None,
            logging: Some(LoggingSpec {
                enabled,
                log_channel: None,
                events: Vec::new(),
                auto_delete_days,
            }),
        }
    }

    async fn aged_events(
        db: &DatabaseConnection,
        guild_id: u64,
        now: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        for days in [10, 8, 1] {
            LogEventFactory::new(db, guild_id)
                .timestamp(now - Duration::days(days))
                .build()
                .await?;
        }
        Ok(())
    }

    /// Tests a seven day window over one guild.
    ///
    /// Expected: the two older events are deleted, the recent one kept
    #[tokio::test]
    async fn deletes_events_past_window() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(LogEvent).build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let now = Utc::now();
        aged_events(db, 1, now).await?;
        let configs = ConfigStore::new(config(true, 7));

        let removed = sweep(db, &configs, &[1], now).await;

        assert_eq!(removed, 2);
        assert_eq!(LogEvent::find().count(db).await?, 1);

        Ok(())
    }

    /// Tests guilds that opt out of the sweep.
    ///
    /// Expected: disabled logging and a zero-day window both keep every event
    #[tokio::test]
    async fn skips_guilds_without_retention() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(LogEvent).build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let now = Utc::now();
        aged_events(db, 1, now).await?;
        aged_events(db, 2, now).await?;
        let configs = ConfigStore::new(config(false, 7));
        configs.set_override(2, config(true, 0));

        let removed = sweep(db, &configs, &[1, 2], now).await;

        assert_eq!(removed, 0);
        assert_eq!(LogEvent::find().count(db).await?, 6);

        Ok(())
    }

    /// Tests per-guild windows in one pass.
    ///
    /// Expected: each guild swept with its own window, unknown guilds untouched
    #[tokio::test]
    async fn applies_each_guild_window() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(LogEvent).build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let now = Utc::now();
        aged_events(db, 1, now).await?;
        aged_events(db, 2, now).await?;
        aged_events(db, 3, now).await?;
        let configs = ConfigStore::new(config(true, 7));
        configs.set_override(2, config(true, 9));

        let removed = sweep(db, &configs, &[1, 2], now).await;

        assert_eq!(removed, 3);
        assert_eq!(LogEvent::find().count(db).await?, 6);

        Ok(())
    }

    /// Tests a window too large to subtract from the current time.
    ///
    /// Expected: that guild is skipped without panicking, later guilds still swept
    #[tokio::test]
    async fn skips_out_of_range_window() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(LogEvent).build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let now = Utc::now();
        aged_events(db, 1, now).await?;
        aged_events(db, 2, now).await?;
        let configs = ConfigStore::new(config(true, 7));
        configs.set_override(1, config(true, i64::MAX));

        let removed = sweep(db, &configs, &[1, 2], now).await;

        assert_eq!(removed, 2);
        assert_eq!(LogEvent::find().count(db).await?, 4);

        Ok(())
    }
}
