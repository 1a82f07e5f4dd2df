use super::*;

/// Tests a deleted message in a guild that logs deletions to `#logs`.
///
/// Expected: row stored with the content and a notice posted to the log channel
#[tokio::test]
async fn stores_row_and_posts_notice() -> Result<(), AppError> {
    let test = TestBuilder::new().with_bot_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = FakeGateway::new();
    let logs = gateway.add_channel("logs", GuildChannelKind::Text, None);
    let config = config(vec![EventType::MessageDelete], Some("logs"));

    let event = EventLogService::new(db, &gateway)
        .message_deleted(&config, &deleted_message("hello"))
        .await?
        .unwrap();

    assert_eq!(event.event_type, "message_delete");
    assert_eq!(event.content.as_deref(), Some("hello"));
    assert!(event
        .additional_data
        .as_deref()
        .unwrap()
        .contains("cat.png"));

    let notices = gateway.state.lock().unwrap().notices.clone();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].0, logs);
    assert_eq!(notices[0].1.title, "🗑️ Message deleted");

    Ok(())
}

/// Tests an event type missing from the allow-list.
///
/// Expected: Ok(None), nothing stored or posted
#[tokio::test]
async fn skips_events_not_allow_listed() -> Result<(), AppError> {
    let test = TestBuilder::new().with_bot_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = FakeGateway::new();
    gateway.add_channel("logs", GuildChannelKind::Text, None);
    let config = config(vec![EventType::MemberJoin], Some("logs"));

    let event = EventLogService::new(db, &gateway)
        .message_deleted(&config, &deleted_message("hello"))
        .await?;

    assert!(event.is_none());
    assert_eq!(LogEventEntity::find().count(db).await?, 0);
    assert!(gateway.state.lock().unwrap().notices.is_empty());

    Ok(())
}

/// Tests that a missing or unwritable log channel does not lose the row.
///
/// Expected: both events stored, no notice posted
#[tokio::test]
async fn notice_failure_keeps_row() -> Result<(), AppError> {
    let test = TestBuilder::new().with_bot_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = FakeGateway::new();
    let service = EventLogService::new(db, &gateway);

    let missing_channel = config(vec![EventType::MessageDelete], Some("logs"));
    service
        .message_deleted(&missing_channel, &deleted_message("first"))
        .await?;

    gateway.add_channel("logs", GuildChannelKind::Text, None);
    gateway.state.lock().unwrap().deny_notices = true;
    service
        .message_deleted(&missing_channel, &deleted_message("second"))
        .await?;

    assert_eq!(LogEventEntity::find().count(db).await?, 2);
    assert!(gateway.state.lock().unwrap().notices.is_empty());

    Ok(())
}

/// Tests an edit that does not change the content.
///
/// Expected: Ok(None)
#[tokio::test]
async fn unchanged_edit_is_ignored() -> Result<(), AppError> {
    let test = TestBuilder::new().with_bot_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = FakeGateway::new();
    let config = config(vec![EventType::MessageEdit], None);
    let service = EventLogService::new(db, &gateway);

    let mut edit = EditedMessage {
        author: user(),
        channel_id: 7,
        message_id: 8,
        before: "same".to_string(),
        after: "same".to_string(),
    };
    assert!(service.message_edited(&config, &edit).await?.is_none());

    edit.after = "changed".to_string();
    let event = service.message_edited(&config, &edit).await?.unwrap();
    assert_eq!(event.content.as_deref(), Some("Before: same\nAfter: changed"));

    Ok(())
}

/// Tests a role edit that touches only its position.
///
/// Expected: Ok(None), while a rename is recorded
#[tokio::test]
async fn role_update_needs_a_tracked_change() -> Result<(), AppError> {
    let test = TestBuilder::new().with_bot_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = FakeGateway::new();
    let config = config(vec![EventType::RoleUpdate], None);
    let service = EventLogService::new(db, &gateway);

    let before = guild_role("Gamers", 0, Permissions::empty());
    let moved = GuildRole {
        position: 5,
        ..before.clone()
    };
    assert!(service.role_updated(&config, &before, &moved).await?.is_none());

    let renamed = guild_role("Players", 0, Permissions::empty());
    let event = service
        .role_updated(&config, &before, &renamed)
        .await?
        .unwrap();
    assert_eq!(event.content.as_deref(), Some("Role 'Players' was updated"));

    Ok(())
}

/// Tests a deleted message longer than the stored content limit.
///
/// Expected: stored content cut to the repository limit, ending in `...`
#[tokio::test]
async fn truncates_stored_content() -> Result<(), AppError> {
    let test = TestBuilder::new().with_bot_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = FakeGateway::new();
    let config = config(vec![EventType::MessageDelete], None);
    let long = "x".repeat(MAX_STORED_CONTENT + 500);

    let event = EventLogService::new(db, &gateway)
        .message_deleted(&config, &deleted_message(&long))
        .await?
        .unwrap();

    let stored = event.content.unwrap();
    assert_eq!(stored.chars().count(), MAX_STORED_CONTENT);
    assert!(stored.ends_with("..."));

    Ok(())
}
