//! Round repository functions.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::rounds_sea::{self as rounds_adapter, RoundCreate, RoundResolve};
use crate::domain::lifecycle::RoundState;
use crate::entities::session_rounds;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionRound {
    pub id: i64,
    pub session_id: i64,
    pub started_by_id: i64,
    /// `None` while the round is in progress
    pub won: Option<bool>,
    pub ghost_type: Option<String>,
    pub started_at: OffsetDateTime,
    pub finished_at: Option<OffsetDateTime>,
}

impl SessionRound {
    pub fn state(&self) -> RoundState {
        RoundState::from_outcome(self.won)
    }
}

impl From<session_rounds::Model> for SessionRound {
    fn from(model: session_rounds::Model) -> Self {
        Self {
            id: model.id,
            session_id: model.session_id,
            started_by_id: model.started_by_id,
            won: model.won,
            ghost_type: model.ghost_type,
            started_at: model.started_at,
            finished_at: model.finished_at,
        }
    }
}

pub async fn find_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i64,
) -> Result<Option<SessionRound>, DomainError> {
    let round = rounds_adapter::find_active(conn, session_id).await?;
    Ok(round.map(SessionRound::from))
}

/// All rounds of a session in start order.
pub async fn find_all_by_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i64,
) -> Result<Vec<SessionRound>, DomainError> {
    let rounds = rounds_adapter::find_all_by_session(conn, session_id).await?;
    Ok(rounds.into_iter().map(SessionRound::from).collect())
}

pub async fn create_round(
    txn: &DatabaseTransaction,
    session_id: i64,
    started_by_id: i64,
) -> Result<SessionRound, DomainError> {
    let round = rounds_adapter::create_round(
        txn,
        RoundCreate {
            session_id,
            started_by_id,
        },
    )
    .await?;
    Ok(SessionRound::from(round))
}

/// Write the outcome. Fails with `RoundAlreadyResolved` on a second attempt.
pub async fn resolve_round(
    txn: &DatabaseTransaction,
    round_id: i64,
    won: bool,
    ghost_type: &str,
) -> Result<SessionRound, DomainError> {
    let round = rounds_adapter::resolve_round(
        txn,
        RoundResolve {
            round_id,
            won,
            ghost_type: ghost_type.to_string(),
        },
    )
    .await?;
    Ok(SessionRound::from(round))
}
