use super::*;

/// Tests clearing every binding on one message.
///
/// Expected: Ok(2) and the binding on the other message survives
#[tokio::test]
async fn deletes_only_that_message() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ReactionRole)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for emoji in ["👍", "👎"] {
        factory::reaction_role::ReactionRoleFactory::new(db, 1)
            .message_id(42)
            .emoji(emoji)
            .build()
            .await?;
    }
    factory::reaction_role::ReactionRoleFactory::new(db, 1)
        .message_id(43)
        .build()
        .await?;

    let removed = ReactionRoleRepository::new(db)
        .delete_by_message(1, 42)
        .await?;

    assert_eq!(removed, 2);
    let count = entity::prelude::ReactionRole::find().count(db).await?;
    assert_eq!(count, 1);

    Ok(())
}

/// Tests that another guild's bindings on the same message id are untouched.
///
/// Expected: Ok(0)
#[tokio::test]
async fn ignores_other_guilds() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ReactionRole)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::reaction_role::ReactionRoleFactory::new(db, 2)
        .message_id(42)
        .build()
        .await?;

    let removed = ReactionRoleRepository::new(db)
        .delete_by_message(1, 42)
        .await?;

    assert_eq!(removed, 0);

    Ok(())
}
