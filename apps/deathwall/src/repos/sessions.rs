//! Session repository functions for domain layer.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::sessions_sea::{self as sessions_adapter, SessionCreate, SessionUpdate};
use crate::domain::lifecycle::SessionPhase;
use crate::entities::sessions;
use crate::errors::domain::{DomainError, ValidationKind};

/// Session domain model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub id: i64,
    pub guild_id: String,
    pub goal: u32,
    pub restrictions_per_round: u32,
    pub successful_rounds: u32,
    pub finished: bool,
    pub score: Option<i64>,
    pub started_at: Option<OffsetDateTime>,
    pub finished_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub lock_version: i32,
}

impl Session {
    pub fn phase(&self) -> SessionPhase {
        SessionPhase::of(self.started_at.is_some(), self.finished)
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }
}

/// Counters are stored signed; a negative value can only come from outside
/// edits and is read as zero.
fn count(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}

impl From<sessions::Model> for Session {
    fn from(model: sessions::Model) -> Self {
        Self {
            id: model.id,
            guild_id: model.guild_id,
            goal: count(model.goal),
            restrictions_per_round: count(model.restrictions_per_round),
            successful_rounds: count(model.successful_rounds),
            finished: model.finished,
            score: model.score,
            started_at: model.started_at,
            finished_at: model.finished_at,
            created_at: model.created_at,
            lock_version: model.lock_version,
        }
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i64,
) -> Result<Option<Session>, DomainError> {
    let session = sessions_adapter::find_by_id(conn, session_id).await?;
    Ok(session.map(Session::from))
}

/// Find session by ID or return NotFound.
pub async fn require_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i64,
) -> Result<Session, DomainError> {
    let session = sessions_adapter::require_session(conn, session_id).await?;
    Ok(Session::from(session))
}

/// Load the session and take its row lock for the rest of the transaction.
pub async fn lock_session(
    txn: &DatabaseTransaction,
    session_id: i64,
) -> Result<Session, DomainError> {
    let session = sessions_adapter::require_session_for_update(txn, session_id).await?;
    Ok(Session::from(session))
}

/// Hold the `(guild_id, user_id)` membership slot for the rest of the transaction.
pub async fn lock_membership(
    txn: &DatabaseTransaction,
    guild_id: &str,
    user_id: &str,
) -> Result<(), DomainError> {
    sessions_adapter::lock_membership(txn, guild_id, user_id).await?;
    Ok(())
}

pub async fn find_unfinished_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    guild_id: &str,
    user_id: &str,
) -> Result<Option<Session>, DomainError> {
    let session = sessions_adapter::find_unfinished_for_user(conn, guild_id, user_id).await?;
    Ok(session.map(Session::from))
}

pub async fn create_session(
    txn: &DatabaseTransaction,
    guild_id: &str,
    goal: u32,
    restrictions_per_round: u32,
) -> Result<Session, DomainError> {
    let goal = i32::try_from(goal).map_err(|_| {
        DomainError::validation(ValidationKind::InvalidGoal, "The goal is out of range")
    })?;
    let restrictions_per_round = i32::try_from(restrictions_per_round).map_err(|_| {
        DomainError::validation(
            ValidationKind::InvalidRestrictionCount,
            "Restrictions per round is out of range",
        )
    })?;
    let dto = SessionCreate {
        guild_id: guild_id.to_string(),
        goal,
        restrictions_per_round,
    };
    let session = sessions_adapter::create_session(txn, dto).await?;
    Ok(Session::from(session))
}

/// Stamp the first round start.
pub async fn mark_started(
    txn: &DatabaseTransaction,
    session: &Session,
    at: OffsetDateTime,
) -> Result<Session, DomainError> {
    let dto = SessionUpdate::new(session.id, session.lock_version).with_started_at(at);
    let updated = sessions_adapter::update_session(txn, dto).await?;
    Ok(Session::from(updated))
}

/// Record a won round.
pub async fn record_win(
    txn: &DatabaseTransaction,
    session: &Session,
) -> Result<Session, DomainError> {
    let wins = i32::try_from(session.successful_rounds.saturating_add(1)).unwrap_or(i32::MAX);
    let dto = SessionUpdate::new(session.id, session.lock_version).with_successful_rounds(wins);
    let updated = sessions_adapter::update_session(txn, dto).await?;
    Ok(Session::from(updated))
}

/// Close the session with its final score and win count in one write.
pub async fn finish(
    txn: &DatabaseTransaction,
    session: &Session,
    successful_rounds: u32,
    score: i64,
    at: OffsetDateTime,
) -> Result<Session, DomainError> {
    let dto = SessionUpdate::new(session.id, session.lock_version)
        .with_successful_rounds(i32::try_from(successful_rounds).unwrap_or(i32::MAX))
        .finished(score, at);
    let updated = sessions_adapter::update_session(txn, dto).await?;
    Ok(Session::from(updated))
}
