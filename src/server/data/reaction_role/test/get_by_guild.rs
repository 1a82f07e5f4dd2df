use super::*;

/// Tests listing bindings scoped to one guild.
///
/// Expected: Ok with only the guild's bindings, oldest first
#[tokio::test]
async fn lists_guild_bindings_in_order() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ReactionRole)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_reaction_role(db, 1).await?;
    let second = factory::create_reaction_role(db, 1).await?;
    factory::create_reaction_role(db, 2).await?;

    let bindings = ReactionRoleRepository::new(db).get_by_guild(1).await?;

    let ids: Vec<i32> = bindings.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);

    Ok(())
}
