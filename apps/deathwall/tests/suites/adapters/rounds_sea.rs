use deathwall::adapters::members_sea::{self, MemberCreate};
use deathwall::adapters::restrictions_sea::{self, RestrictionCreate};
use deathwall::adapters::rounds_sea::{self, RoundCreate, RoundResolve};
use deathwall::adapters::sessions_sea::{self, SessionCreate};
use deathwall::infra::db_errors::map_db_err;
use deathwall::{AppError, ErrorCode};
use sea_orm::{DatabaseTransaction, TransactionTrait};

use crate::support::test_state::build_test_state;

/// Session with a leader; returns (session_id, leader_member_id).
async fn seed(txn: &DatabaseTransaction) -> Result<(i64, i64), AppError> {
    let session = sessions_sea::create_session(
        txn,
        SessionCreate {
            guild_id: "g1".into(),
            goal: 3,
            restrictions_per_round: 2,
        },
    )
    .await?;
    let leader = members_sea::create_member(txn, MemberCreate::leader(session.id, "alice")).await?;
    Ok((session.id, leader.id))
}

fn resolve(round_id: i64, won: bool) -> RoundResolve {
    RoundResolve {
        round_id,
        won,
        ghost_type: "banshee".into(),
    }
}

#[tokio::test]
async fn active_round_is_the_unresolved_one() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let txn = state.db().begin().await?;
    let (session_id, leader_id) = seed(&txn).await?;

    let round = rounds_sea::create_round(
        &txn,
        RoundCreate {
            session_id,
            started_by_id: leader_id,
        },
    )
    .await?;
    assert_eq!(round.won, None);
    let active = rounds_sea::find_active(&txn, session_id).await?;
    assert_eq!(active.map(|r| r.id), Some(round.id));

    let resolved = rounds_sea::resolve_round(&txn, resolve(round.id, false)).await?;
    assert_eq!(resolved.won, Some(false));
    assert_eq!(resolved.ghost_type.as_deref(), Some("banshee"));
    assert!(resolved.finished_at.is_some());
    assert!(rounds_sea::find_active(&txn, session_id).await?.is_none());

    txn.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn resolution_is_write_once() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let txn = state.db().begin().await?;
    let (session_id, leader_id) = seed(&txn).await?;

    let round = rounds_sea::create_round(
        &txn,
        RoundCreate {
            session_id,
            started_by_id: leader_id,
        },
    )
    .await?;
    rounds_sea::resolve_round(&txn, resolve(round.id, true)).await?;

    let err = rounds_sea::resolve_round(&txn, resolve(round.id, false))
        .await
        .unwrap_err();
    let app: AppError = map_db_err(err).into();
    assert_eq!(app.code(), ErrorCode::RoundAlreadyResolved);

    let stored = rounds_sea::find_by_id(&txn, round.id).await?.unwrap();
    assert_eq!(stored.won, Some(true));

    let err = rounds_sea::resolve_round(&txn, resolve(9_999, true))
        .await
        .unwrap_err();
    let app: AppError = map_db_err(err).into();
    assert_eq!(app.code(), ErrorCode::RoundNotFound);

    txn.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn restrictions_attach_to_their_round() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let txn = state.db().begin().await?;
    let (session_id, leader_id) = seed(&txn).await?;

    let mut round_ids = Vec::new();
    for restriction in ["blackout", "shy_ghost"] {
        let round = rounds_sea::create_round(
            &txn,
            RoundCreate {
                session_id,
                started_by_id: leader_id,
            },
        )
        .await?;
        restrictions_sea::create_many(
            &txn,
            vec![RestrictionCreate {
                session_id,
                round_id: round.id,
                restriction_id: restriction.into(),
                metadata: "{}".into(),
            }],
        )
        .await?;
        rounds_sea::resolve_round(&txn, resolve(round.id, true)).await?;
        round_ids.push(round.id);
    }

    let all = restrictions_sea::find_all_by_session(&txn, session_id).await?;
    assert_eq!(all.len(), 2);
    let second: Vec<_> = all.iter().filter(|r| r.round_id == round_ids[1]).collect();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].restriction_id, "shy_ghost");

    let order: Vec<i64> = rounds_sea::find_all_by_session(&txn, session_id)
        .await?
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(order, round_ids);

    txn.rollback().await?;
    Ok(())
}
