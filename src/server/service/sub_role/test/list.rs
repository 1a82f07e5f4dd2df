use super::*;

/// Tests listing with one registration whose role was deleted elsewhere.
///
/// Expected: existing roles sorted highest first, dangling registration removed
#[tokio::test]
async fn lists_existing_roles_by_position() -> Result<(), AppError> {
    let test = TestBuilder::new().with_bot_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = FakeGateway::new();
    let low = gateway.add_role("Low");
    let high = gateway.add_role("High");

    for role_id in [low, high] {
        factory::sub_role::SubRoleFactory::new(db, GUILD_ID)
            .role_id(role_id)
            .build()
            .await?;
    }
    let ghost = factory::create_sub_role(db, GUILD_ID).await?;

    let roles = SubRoleService::new(db, &gateway).list().await?;

    let ids: Vec<u64> = roles.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![high, low]);

    let ghost_id = ghost.role_id.parse::<u64>().unwrap();
    assert!(
        !SubRoleRepository::new(db)
            .is_sub_role(GUILD_ID, ghost_id)
            .await?
    );

    Ok(())
}

/// Tests listing a guild without sub-roles.
///
/// Expected: empty list
#[tokio::test]
async fn empty_guild_lists_nothing() -> Result<(), AppError> {
    let test = TestBuilder::new().with_bot_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = FakeGateway::new();

    let roles = SubRoleService::new(db, &gateway).list().await?;

    assert!(roles.is_empty());

    Ok(())
}
