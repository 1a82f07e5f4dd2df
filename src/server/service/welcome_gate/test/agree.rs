use super::*;
use entity::prelude::LogEvent;
use sea_orm::{EntityTrait, PaginatorTrait};

/// Tests the happy path of the gate.
///
/// Expected: Verified, roles swapped, one audit event written
#[tokio::test]
async fn swaps_roles_and_records_event() -> Result<(), AppError> {
    let test = TestBuilder::new().with_bot_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = FakeGateway::new();
    let gate = install_gate(db, &gateway).await?;
    gateway.add_member(USER_ID, vec![gate.initial_role_id]);

    let outcome = WelcomeGateService::new(db, &gateway)
        .agree(USER_ID, "newbie", 1, gate.message_id)
        .await?;

    assert_eq!(outcome, AgreeOutcome::Verified);
    assert_eq!(gateway.member_roles(USER_ID), vec![gate.final_role_id]);

    let events = LogEvent::find().all(db).await?;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, "welcome_gate_agree");
    assert_eq!(events[0].user_id, Some(USER_ID.to_string()));

    Ok(())
}

/// Tests a member who already holds the verified role.
///
/// Expected: AlreadyVerified without any role change
#[tokio::test]
async fn verified_member_is_noop() -> Result<(), AppError> {
    let test = TestBuilder::new().with_bot_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = FakeGateway::new();
    let gate = install_gate(db, &gateway).await?;
    gateway.add_member(USER_ID, vec![gate.final_role_id]);

    let outcome = WelcomeGateService::new(db, &gateway)
        .agree(USER_ID, "veteran", 1, gate.message_id)
        .await?;

    assert_eq!(outcome, AgreeOutcome::AlreadyVerified);
    assert_eq!(FakeGateway::count(&gateway.calls.add_member_role), 0);
    assert_eq!(FakeGateway::count(&gateway.calls.remove_member_role), 0);

    Ok(())
}

/// Tests a member without the unverified role.
///
/// Expected: NotNewMember and no audit event
#[tokio::test]
async fn rejects_member_without_initial_role() -> Result<(), AppError> {
    let test = TestBuilder::new().with_bot_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = FakeGateway::new();
    let gate = install_gate(db, &gateway).await?;
    gateway.add_member(USER_ID, Vec::new());

    let outcome = WelcomeGateService::new(db, &gateway)
        .agree(USER_ID, "stranger", 1, gate.message_id)
        .await?;

    assert_eq!(outcome, AgreeOutcome::NotNewMember);
    assert_eq!(LogEvent::find().count(db).await?, 0);

    Ok(())
}

/// Tests a button press on a message that is not the gate's prompt.
///
/// Expected: NotApplicable
#[tokio::test]
async fn other_message_is_not_applicable() -> Result<(), AppError> {
    let test = TestBuilder::new().with_bot_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = FakeGateway::new();
    let gate = install_gate(db, &gateway).await?;
    gateway.add_member(USER_ID, vec![gate.initial_role_id]);

    let outcome = WelcomeGateService::new(db, &gateway)
        .agree(USER_ID, "newbie", 1, gate.message_id + 1)
        .await?;

    assert_eq!(outcome, AgreeOutcome::NotApplicable);
    assert_eq!(gateway.member_roles(USER_ID), vec![gate.initial_role_id]);

    Ok(())
}

/// Tests a guild whose gate is disabled, and one with no gate at all.
///
/// Expected: NotApplicable in both cases
#[tokio::test]
async fn disabled_or_missing_gate_is_not_applicable() -> Result<(), AppError> {
    let test = TestBuilder::new().with_bot_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = FakeGateway::new();
    gateway.add_member(USER_ID, Vec::new());
    let service = WelcomeGateService::new(db, &gateway);

    assert_eq!(
        service.agree(USER_ID, "newbie", 1, 5).await?,
        AgreeOutcome::NotApplicable
    );

    let gate = factory::welcome_gate::WelcomeGateFactory::new(db, GUILD_ID)
        .enabled(false)
        .build()
        .await?;
    let message_id = gate.message_id.and_then(|id| id.parse().ok()).unwrap();

    assert_eq!(
        service.agree(USER_ID, "newbie", 1, message_id).await?,
        AgreeOutcome::NotApplicable
    );

    Ok(())
}

/// Tests a refused grant of the verified role.
///
/// Expected: Failed and the member keeps only the unverified role
#[tokio::test]
async fn failed_grant_leaves_member_untouched() -> Result<(), AppError> {
    let test = TestBuilder::new().with_bot_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = FakeGateway::new();
    let gate = install_gate(db, &gateway).await?;
    gateway.add_member(USER_ID, vec![gate.initial_role_id]);
    gateway.state.lock().unwrap().deny_member_role_add = true;

    let outcome = WelcomeGateService::new(db, &gateway)
        .agree(USER_ID, "newbie", 1, gate.message_id)
        .await?;

    assert_eq!(outcome, AgreeOutcome::Failed);
    assert_eq!(gateway.member_roles(USER_ID), vec![gate.initial_role_id]);
    assert_eq!(FakeGateway::count(&gateway.calls.remove_member_role), 0);

    Ok(())
}

/// Tests a refused removal of the unverified role after a successful grant.
///
/// Expected: Verified, member holds both roles
#[tokio::test]
async fn failed_removal_still_verifies() -> Result<(), AppError> {
    let test = TestBuilder::new().with_bot_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = FakeGateway::new();
    let gate = install_gate(db, &gateway).await?;
    gateway.add_member(USER_ID, vec![gate.initial_role_id]);
    gateway.state.lock().unwrap().deny_member_role_remove = true;

    let outcome = WelcomeGateService::new(db, &gateway)
        .agree(USER_ID, "newbie", 1, gate.message_id)
        .await?;

    assert_eq!(outcome, AgreeOutcome::Verified);
    assert_eq!(
        gateway.member_roles(USER_ID),
        vec![gate.initial_role_id, gate.final_role_id]
    );

    Ok(())
}
