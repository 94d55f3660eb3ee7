use deathwall::adapters::members_sea::{self, MemberCreate};
use deathwall::adapters::sessions_sea::{self, SessionCreate};
use deathwall::infra::db_errors::map_db_err;
use deathwall::{AppError, ErrorCode};
use sea_orm::TransactionTrait;

use crate::support::test_state::build_test_state;

#[tokio::test]
async fn members_list_leader_first() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let txn = state.db().begin().await?;

    let session = sessions_sea::create_session(
        &txn,
        SessionCreate {
            guild_id: "g1".into(),
            goal: 2,
            restrictions_per_round: 1,
        },
    )
    .await?;
    members_sea::create_member(&txn, MemberCreate::member(session.id, "bob")).await?;
    members_sea::create_member(&txn, MemberCreate::leader(session.id, "alice")).await?;
    members_sea::create_member(&txn, MemberCreate::member(session.id, "carol")).await?;

    let users: Vec<String> = members_sea::find_all_by_session(&txn, session.id)
        .await?
        .into_iter()
        .map(|m| m.user_id)
        .collect();
    assert_eq!(users, ["alice", "bob", "carol"]);

    txn.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn duplicate_member_is_already_in_session() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let txn = state.db().begin().await?;

    let session = sessions_sea::create_session(
        &txn,
        SessionCreate {
            guild_id: "g1".into(),
            goal: 2,
            restrictions_per_round: 1,
        },
    )
    .await?;
    members_sea::create_member(&txn, MemberCreate::leader(session.id, "alice")).await?;

    let err = members_sea::create_member(&txn, MemberCreate::member(session.id, "alice"))
        .await
        .unwrap_err();
    let app: AppError = map_db_err(err).into();
    assert_eq!(app.code(), ErrorCode::AlreadyInSession);

    txn.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn delete_member_removes_row() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let txn = state.db().begin().await?;

    let session = sessions_sea::create_session(
        &txn,
        SessionCreate {
            guild_id: "g1".into(),
            goal: 2,
            restrictions_per_round: 1,
        },
    )
    .await?;
    let bob = members_sea::create_member(&txn, MemberCreate::member(session.id, "bob")).await?;
    members_sea::delete_member(&txn, bob.id).await?;

    assert!(members_sea::find_member(&txn, session.id, "bob")
        .await?
        .is_none());

    txn.rollback().await?;
    Ok(())
}
