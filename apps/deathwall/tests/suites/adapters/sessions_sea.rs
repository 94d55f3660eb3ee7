use deathwall::adapters::members_sea::{self, MemberCreate};
use deathwall::adapters::sessions_sea::{self, SessionCreate, SessionUpdate};
use deathwall::infra::db_errors::map_db_err;
use deathwall::{AppError, ErrorCode};
use sea_orm::TransactionTrait;
use time::OffsetDateTime;

use crate::support::test_state::build_test_state;

fn new_session(guild: &str) -> SessionCreate {
    SessionCreate {
        guild_id: guild.to_string(),
        goal: 3,
        restrictions_per_round: 2,
    }
}

#[tokio::test]
async fn create_session_sets_defaults() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let txn = state.db().begin().await?;

    let session = sessions_sea::create_session(&txn, new_session("g1")).await?;
    assert_eq!(session.guild_id, "g1");
    assert_eq!(session.successful_rounds, 0);
    assert!(!session.finished);
    assert_eq!(session.score, None);
    assert_eq!(session.started_at, None);
    assert_eq!(session.lock_version, 1);

    let found = sessions_sea::require_session(&txn, session.id).await?;
    assert_eq!(found.id, session.id);

    txn.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn require_missing_session_maps_to_not_found() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let txn = state.db().begin().await?;

    let err = sessions_sea::require_session(&txn, 77).await.unwrap_err();
    let app: AppError = map_db_err(err).into();
    assert_eq!(app.code(), ErrorCode::SessionNotFound);

    txn.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn unfinished_lookup_is_scoped_to_guild_and_member() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let txn = state.db().begin().await?;

    let session = sessions_sea::create_session(&txn, new_session("g1")).await?;
    members_sea::create_member(&txn, MemberCreate::leader(session.id, "alice")).await?;

    let found = sessions_sea::find_unfinished_for_user(&txn, "g1", "alice").await?;
    assert_eq!(found.map(|s| s.id), Some(session.id));
    assert!(sessions_sea::find_unfinished_for_user(&txn, "g2", "alice")
        .await?
        .is_none());
    assert!(sessions_sea::find_unfinished_for_user(&txn, "g1", "bob")
        .await?
        .is_none());

    let update = SessionUpdate::new(session.id, session.lock_version)
        .finished(10, OffsetDateTime::now_utc());
    sessions_sea::update_session(&txn, update).await?;
    assert!(sessions_sea::find_unfinished_for_user(&txn, "g1", "alice")
        .await?
        .is_none());

    txn.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn update_bumps_version_and_rejects_stale_writes() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let txn = state.db().begin().await?;

    let session = sessions_sea::create_session(&txn, new_session("g1")).await?;
    let updated = sessions_sea::update_session(
        &txn,
        SessionUpdate::new(session.id, session.lock_version).with_successful_rounds(1),
    )
    .await?;
    assert_eq!(updated.successful_rounds, 1);
    assert_eq!(updated.lock_version, session.lock_version + 1);

    let err = sessions_sea::update_session(
        &txn,
        SessionUpdate::new(session.id, session.lock_version).with_successful_rounds(2),
    )
    .await
    .unwrap_err();
    let app: AppError = map_db_err(err).into();
    assert_eq!(app.code(), ErrorCode::OptimisticLock);

    let current = sessions_sea::require_session(&txn, session.id).await?;
    assert_eq!(current.successful_rounds, 1);

    txn.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn lock_membership_is_a_no_op_on_sqlite() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let txn = state.db().begin().await?;

    sessions_sea::lock_membership(&txn, "g1", "alice").await?;
    sessions_sea::lock_membership(&txn, "g1", "alice").await?;
    let session = sessions_sea::create_session(&txn, new_session("g1")).await?;
    assert_eq!(session.guild_id, "g1");

    txn.rollback().await?;
    Ok(())
}
