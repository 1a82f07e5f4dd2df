use super::*;

/// Tests removing a binding and its reaction.
///
/// Expected: row gone and the bot's reaction cleared
#[tokio::test]
async fn removes_binding_and_reaction() -> Result<(), AppError> {
    let test = TestBuilder::new().with_bot_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = FakeGateway::new();
    let (_, message_id) = guild_with_message(&gateway);
    let service = ReactionRoleService::new(db, &gateway);
    service
        .bind(&config(), &message_id.to_string(), "🎮", &find_role(&gateway, "Gamers"))
        .await?;

    service.unbind(&message_id.to_string(), "🎮").await?;

    assert_eq!(service.resolve(message_id, "🎮").await?, None);
    assert!(gateway.state.lock().unwrap().reactions.is_empty());

    Ok(())
}

/// Tests removing a binding that does not exist.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn missing_binding_is_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new().with_bot_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = FakeGateway::new();

    let result = ReactionRoleService::new(db, &gateway)
        .unbind("123456789", "🎮")
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests that another guild's binding cannot be removed.
///
/// Expected: Err(NotFound) and the row survives
#[tokio::test]
async fn ignores_other_guild_binding() -> Result<(), AppError> {
    let test = TestBuilder::new().with_bot_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = FakeGateway::new();
    factory::reaction_role::ReactionRoleFactory::new(db, GUILD_ID + 1)
        .message_id(555)
        .emoji("🎮")
        .build()
        .await?;

    let result = ReactionRoleService::new(db, &gateway)
        .unbind("555", "🎮")
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    let count = entity::prelude::ReactionRole::find().count(db).await?;
    assert_eq!(count, 1);

    Ok(())
}
