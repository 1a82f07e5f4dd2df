use super::*;

/// Tests role classification.
///
/// Expected: core, sub and other roles each reported as such
#[tokio::test]
async fn classifies_roles() -> Result<(), AppError> {
    let test = TestBuilder::new().with_bot_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = FakeGateway::new().with_role("Member").with_role("Bots");
    let service = SubRoleService::new(db, &gateway);
    let sub = service.create(&config(), "Gamers", None).await?;

    let core = service
        .info(&config(), &find_role(&gateway, "Member"))
        .await?;
    let sub = service.info(&config(), &sub).await?;
    let other = service.info(&config(), &find_role(&gateway, "Bots")).await?;

    assert_eq!(core.kind, RoleKind::Core);
    assert_eq!(sub.kind, RoleKind::Sub);
    assert_eq!(other.kind, RoleKind::Other);

    Ok(())
}

/// Tests the notable permission summary.
///
/// Expected: administrator collapses to one entry, others listed in order
#[tokio::test]
async fn summarizes_notable_permissions() -> Result<(), AppError> {
    let test = TestBuilder::new().with_bot_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = FakeGateway::new();
    let service = SubRoleService::new(db, &gateway);

    let mut role = GuildRole {
        permissions: Permissions::ADMINISTRATOR | Permissions::KICK_MEMBERS,
        ..find_role(&gateway, "@everyone")
    };
    let admin = service.info(&config(), &role).await?;
    assert_eq!(admin.notable_permissions, vec!["Administrator"]);

    role.permissions = Permissions::KICK_MEMBERS | Permissions::MANAGE_MESSAGES;
    let moderator = service.info(&config(), &role).await?;
    assert_eq!(
        moderator.notable_permissions,
        vec!["Manage Messages", "Kick Members"]
    );

    Ok(())
}
