use super::*;

/// Tests that listing drops bindings whose role or channel is gone.
///
/// Expected: only the valid binding is returned and the dangling rows are deleted
#[tokio::test]
async fn removes_dangling_bindings() -> Result<(), AppError> {
    let test = TestBuilder::new().with_bot_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = FakeGateway::new();
    let role_id = gateway.add_role("Gamers");
    let channel_id = gateway.add_channel("roles", GuildChannelKind::Text, None);

    let valid = factory::reaction_role::ReactionRoleFactory::new(db, GUILD_ID)
        .channel_id(channel_id)
        .role_id(role_id)
        .build()
        .await?;
    factory::reaction_role::ReactionRoleFactory::new(db, GUILD_ID)
        .channel_id(channel_id)
        .build()
        .await?;
    factory::reaction_role::ReactionRoleFactory::new(db, GUILD_ID)
        .role_id(role_id)
        .build()
        .await?;

    let bindings = ReactionRoleService::new(db, &gateway).list().await?;

    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings[0].id, valid.id);
    let count = entity::prelude::ReactionRole::find().count(db).await?;
    assert_eq!(count, 1);

    Ok(())
}
