use super::*;

/// Tests listing only the guild's registrations.
///
/// Expected: Ok with the two sub-roles of guild 1 in creation order
#[tokio::test]
async fn lists_guild_sub_roles() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::SubRole)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_sub_role(db, 1).await?;
    let second = factory::create_sub_role(db, 1).await?;
    factory::create_sub_role(db, 2).await?;

    let sub_roles = SubRoleRepository::new(db).get_by_guild(1).await?;

    let names: Vec<&str> = sub_roles.iter().map(|s| s.role_name.as_str()).collect();
    assert_eq!(names, vec![first.role_name.as_str(), second.role_name.as_str()]);

    Ok(())
}
