use super::*;

const USER_ID: u64 = 42;

/// Binds 🎮 to a fresh `Gamers` role and returns (message id, role id).
async fn bound_message(
    db: &DatabaseConnection,
    gateway: &FakeGateway,
) -> Result<(u64, u64), AppError> {
    let (_, message_id) = guild_with_message(gateway);
    let gamers = find_role(gateway, "Gamers");
    ReactionRoleService::new(db, gateway)
        .bind(&config(), &message_id.to_string(), "🎮", &gamers)
        .await?;
    Ok((message_id, gamers.id))
}

/// Tests that reacting grants the bound role.
///
/// Expected: Granted and the member holds the role
#[tokio::test]
async fn reaction_add_grants_role() -> Result<(), AppError> {
    let test = TestBuilder::new().with_bot_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = FakeGateway::new();
    let (message_id, role_id) = bound_message(db, &gateway).await?;
    gateway.add_member(USER_ID, Vec::new());

    let outcome = ReactionRoleService::new(db, &gateway)
        .on_reaction_add(USER_ID, message_id, "🎮")
        .await?;

    assert_eq!(outcome, ReactionOutcome::Granted);
    assert_eq!(gateway.member_roles(USER_ID), vec![role_id]);

    Ok(())
}

/// Tests reacting when the member already holds the role.
///
/// Expected: Unchanged without any gateway call
#[tokio::test]
async fn reaction_add_is_noop_when_held() -> Result<(), AppError> {
    let test = TestBuilder::new().with_bot_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = FakeGateway::new();
    let (message_id, role_id) = bound_message(db, &gateway).await?;
    gateway.add_member(USER_ID, vec![role_id]);

    let outcome = ReactionRoleService::new(db, &gateway)
        .on_reaction_add(USER_ID, message_id, "🎮")
        .await?;

    assert_eq!(outcome, ReactionOutcome::Unchanged);
    assert_eq!(FakeGateway::count(&gateway.calls.add_member_role), 0);

    Ok(())
}

/// Tests removing a reaction revokes the role, and is a no-op when not held.
///
/// Expected: Revoked, then Unchanged with a single gateway call in total
#[tokio::test]
async fn reaction_remove_revokes_once() -> Result<(), AppError> {
    let test = TestBuilder::new().with_bot_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = FakeGateway::new();
    let (message_id, role_id) = bound_message(db, &gateway).await?;
    gateway.add_member(USER_ID, vec![role_id]);
    let service = ReactionRoleService::new(db, &gateway);

    let first = service
        .on_reaction_remove(USER_ID, message_id, "🎮")
        .await?;
    let second = service
        .on_reaction_remove(USER_ID, message_id, "🎮")
        .await?;

    assert_eq!(first, ReactionOutcome::Revoked);
    assert_eq!(second, ReactionOutcome::Unchanged);
    assert_eq!(FakeGateway::count(&gateway.calls.remove_member_role), 1);
    assert!(gateway.member_roles(USER_ID).is_empty());

    Ok(())
}

/// Tests a reaction on a binding whose role was deleted.
///
/// Expected: StaleRemoved and the binding is gone
#[tokio::test]
async fn deleted_role_removes_binding() -> Result<(), AppError> {
    let test = TestBuilder::new().with_bot_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = FakeGateway::new();
    let (message_id, role_id) = bound_message(db, &gateway).await?;
    gateway.add_member(USER_ID, Vec::new());
    gateway
        .state
        .lock()
        .unwrap()
        .roles
        .retain(|r| r.id != role_id);
    let service = ReactionRoleService::new(db, &gateway);

    let outcome = service.on_reaction_add(USER_ID, message_id, "🎮").await?;

    assert_eq!(outcome, ReactionOutcome::StaleRemoved);
    assert_eq!(service.resolve(message_id, "🎮").await?, None);

    Ok(())
}

/// Tests a reaction with no binding.
///
/// Expected: Ignored
#[tokio::test]
async fn unbound_reaction_is_ignored() -> Result<(), AppError> {
    let test = TestBuilder::new().with_bot_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = FakeGateway::new();
    let (message_id, _) = bound_message(db, &gateway).await?;
    gateway.add_member(USER_ID, Vec::new());

    let outcome = ReactionRoleService::new(db, &gateway)
        .on_reaction_add(USER_ID, message_id, "👍")
        .await?;

    assert_eq!(outcome, ReactionOutcome::Ignored);

    Ok(())
}
