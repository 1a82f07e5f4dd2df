use super::*;

/// Tests creating a sub-role with a color.
///
/// Expected: permissionless role created and registered
#[tokio::test]
async fn creates_and_registers_role() -> Result<(), AppError> {
    let test = TestBuilder::new().with_bot_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = FakeGateway::new();

    let role = SubRoleService::new(db, &gateway)
        .create(&config(), "Gamers", Some("#ff0000"))
        .await?;

    assert_eq!(role.name, "Gamers");
    assert_eq!(role.color, 0xff0000);
    assert!(role.permissions.is_empty());
    assert!(
        SubRoleRepository::new(db)
            .is_sub_role(GUILD_ID, role.id)
            .await?
    );

    Ok(())
}

/// Tests the name checks that run before anything is created.
///
/// Expected: Err(BadRequest) for a core name, an existing name and a blank name
#[tokio::test]
async fn rejects_unusable_names() -> Result<(), AppError> {
    let test = TestBuilder::new().with_bot_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = FakeGateway::new().with_role("Gamers");
    let service = SubRoleService::new(db, &gateway);

    for name in ["Member", "Gamers", "  ", "bad@name"] {
        let result = service.create(&config(), name, None).await;
        assert!(
            matches!(result, Err(AppError::BadRequest(_))),
            "{} should be rejected",
            name
        );
    }
    assert_eq!(FakeGateway::count(&gateway.calls.create_role), 0);

    Ok(())
}

/// Tests an unparsable color.
///
/// Expected: Err(BadRequest) and no role created
#[tokio::test]
async fn rejects_invalid_color() -> Result<(), AppError> {
    let test = TestBuilder::new().with_bot_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = FakeGateway::new();

    let result = SubRoleService::new(db, &gateway)
        .create(&config(), "Gamers", Some("not-a-color"))
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert_eq!(FakeGateway::count(&gateway.calls.create_role), 0);

    Ok(())
}
