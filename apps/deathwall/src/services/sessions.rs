//! Session lifecycle: creation, membership and termination.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use serde::Serialize;
use time::OffsetDateTime;
use tracing::{info, warn};

use super::scores::ScoreService;
use crate::domain::lifecycle::{evaluate_termination, SessionPhase, StreakTally, Termination};
use crate::domain::scoring::ScoreBreakdown;
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::repos::{members, rounds, sessions, Session, SessionMember, SessionRound};

/// Where a session stands after a round was resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SessionOutcome {
    Continuing { successful_rounds: u32, goal: u32 },
    Finished { goal_reached: bool, score: ScoreBreakdown },
}

impl SessionOutcome {
    pub fn is_finished(&self) -> bool {
        matches!(self, SessionOutcome::Finished { .. })
    }
}

/// Read model for showing a session to its members.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOverview {
    pub session: Session,
    /// Leader first
    pub members: Vec<SessionMember>,
    pub phase: SessionPhase,
    pub successful_rounds: u32,
    pub goal: u32,
    pub active_round: Option<SessionRound>,
}

/// Largest goal or per-round count the store can hold.
pub const MAX_SESSION_COUNT: u32 = i32::MAX as u32;

fn reject(kind: ConflictKind, detail: &str) -> AppError {
    warn!(?kind, detail, "Command rejected");
    DomainError::conflict(kind, detail).into()
}

pub(crate) fn ensure_not_finished(session: &Session) -> Result<(), AppError> {
    if session.finished {
        return Err(reject(
            ConflictKind::SessionFinished,
            "This session has already finished",
        ));
    }
    Ok(())
}

fn ensure_open(session: &Session) -> Result<(), AppError> {
    ensure_not_finished(session)?;
    if !session.phase().accepts_membership_changes() {
        return Err(reject(
            ConflictKind::SessionAlreadyStarted,
            "Members cannot change once the first round has started",
        ));
    }
    Ok(())
}

/// Session domain service.
#[derive(Debug, Default, Clone, Copy)]
pub struct SessionService;

impl SessionService {
    pub fn new() -> Self {
        Self
    }

    /// Create a session led by `leader_user_id`.
    pub async fn create_session(
        &self,
        txn: &DatabaseTransaction,
        guild_id: &str,
        leader_user_id: &str,
        goal: u32,
        restrictions_per_round: u32,
    ) -> Result<Session, AppError> {
        if !(1..=MAX_SESSION_COUNT).contains(&goal) {
            return Err(DomainError::validation(
                ValidationKind::InvalidGoal,
                format!("The goal must be between 1 and {MAX_SESSION_COUNT} rounds"),
            )
            .into());
        }
        if !(1..=MAX_SESSION_COUNT).contains(&restrictions_per_round) {
            return Err(DomainError::validation(
                ValidationKind::InvalidRestrictionCount,
                format!("Restrictions per round must be between 1 and {MAX_SESSION_COUNT}"),
            )
            .into());
        }

        sessions::lock_membership(txn, guild_id, leader_user_id).await?;
        if sessions::find_unfinished_for_user(txn, guild_id, leader_user_id)
            .await?
            .is_some()
        {
            return Err(reject(
                ConflictKind::AlreadyInSession,
                "You are already in a session in this server",
            ));
        }

        let session = sessions::create_session(txn, guild_id, goal, restrictions_per_round).await?;
        members::add_leader(txn, session.id, leader_user_id).await?;

        info!(
            session_id = session.id,
            goal, restrictions_per_round, "Session created"
        );
        Ok(session)
    }

    /// Add `user_id` to the session. Only the leader may invite, and only
    /// before the first round.
    pub async fn invite_member(
        &self,
        txn: &DatabaseTransaction,
        session_id: i64,
        actor_user_id: &str,
        user_id: &str,
    ) -> Result<SessionMember, AppError> {
        let session = sessions::lock_session(txn, session_id).await?;
        ensure_not_finished(&session)?;
        self.ensure_leader(txn, session_id, actor_user_id).await?;
        ensure_open(&session)?;

        sessions::lock_membership(txn, &session.guild_id, user_id).await?;
        if sessions::find_unfinished_for_user(txn, &session.guild_id, user_id)
            .await?
            .is_some()
        {
            return Err(reject(
                ConflictKind::AlreadyInSession,
                "This user is already in a session in this server",
            ));
        }

        let member = members::add_member(txn, session_id, user_id).await?;
        info!(session_id, member_id = member.id, "Member invited");
        Ok(member)
    }

    /// Remove `user_id` from the session. Leader only, before the first round.
    pub async fn remove_member(
        &self,
        txn: &DatabaseTransaction,
        session_id: i64,
        actor_user_id: &str,
        user_id: &str,
    ) -> Result<(), AppError> {
        let session = sessions::lock_session(txn, session_id).await?;
        ensure_not_finished(&session)?;
        self.ensure_leader(txn, session_id, actor_user_id).await?;
        ensure_open(&session)?;

        let target = self.require_member(txn, session_id, user_id).await?;
        if target.is_leader {
            return Err(reject(
                ConflictKind::LeaderRemoval,
                "The leader cannot be removed from their own session",
            ));
        }

        members::remove_member(txn, target.id).await?;
        info!(session_id, member_id = target.id, "Member removed");
        Ok(())
    }

    /// A non-leader member leaves before the first round.
    pub async fn leave_session(
        &self,
        txn: &DatabaseTransaction,
        session_id: i64,
        user_id: &str,
    ) -> Result<(), AppError> {
        let session = sessions::lock_session(txn, session_id).await?;
        ensure_open(&session)?;

        let member = self.require_member(txn, session_id, user_id).await?;
        if member.is_leader {
            return Err(reject(
                ConflictKind::LeaderRemoval,
                "The leader cannot leave their own session",
            ));
        }

        members::remove_member(txn, member.id).await?;
        info!(session_id, member_id = member.id, "Member left");
        Ok(())
    }

    pub async fn list_members<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        session_id: i64,
    ) -> Result<Vec<SessionMember>, AppError> {
        sessions::require_session(conn, session_id).await?;
        Ok(members::find_all_by_session(conn, session_id).await?)
    }

    /// The caller's unfinished session in `guild_id`, if any.
    pub async fn find_active_session<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        guild_id: &str,
        user_id: &str,
    ) -> Result<Option<Session>, AppError> {
        Ok(sessions::find_unfinished_for_user(conn, guild_id, user_id).await?)
    }

    pub async fn session_overview<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        session_id: i64,
    ) -> Result<SessionOverview, AppError> {
        let session = sessions::require_session(conn, session_id).await?;
        let members = members::find_all_by_session(conn, session_id).await?;
        let active_round = rounds::find_active(conn, session_id).await?;

        Ok(SessionOverview {
            phase: session.phase(),
            successful_rounds: session.successful_rounds,
            goal: session.goal,
            session,
            members,
            active_round,
        })
    }

    /// Decide whether the session ends after a resolution and, if so, score
    /// and close it in the caller's transaction.
    pub async fn evaluate_termination(
        &self,
        txn: &DatabaseTransaction,
        session: &Session,
        scores: &ScoreService,
    ) -> Result<SessionOutcome, AppError> {
        let history = rounds::find_all_by_session(txn, session.id).await?;
        let tally = StreakTally::from_outcomes(history.iter().map(|r| r.won));

        match evaluate_termination(tally, session.goal) {
            Termination::Continue => Ok(SessionOutcome::Continuing {
                successful_rounds: tally.wins,
                goal: session.goal,
            }),
            termination => {
                let score = scores.score_rounds(txn, session, &history).await?;
                let finished = sessions::finish(
                    txn,
                    session,
                    tally.wins,
                    score.score,
                    OffsetDateTime::now_utc(),
                )
                .await?;

                info!(
                    session_id = finished.id,
                    ?termination,
                    score = score.score,
                    successful_rounds = tally.wins,
                    total_rounds = score.total_rounds,
                    "Session finished"
                );
                Ok(SessionOutcome::Finished {
                    goal_reached: termination == Termination::GoalReached,
                    score,
                })
            }
        }
    }

    async fn ensure_leader(
        &self,
        txn: &DatabaseTransaction,
        session_id: i64,
        actor_user_id: &str,
    ) -> Result<SessionMember, AppError> {
        match members::find_member(txn, session_id, actor_user_id).await? {
            Some(member) if member.is_leader => Ok(member),
            _ => Err(reject(
                ConflictKind::NotLeader,
                "Only the session leader can do that",
            )),
        }
    }

    pub(crate) async fn require_member(
        &self,
        txn: &DatabaseTransaction,
        session_id: i64,
        user_id: &str,
    ) -> Result<SessionMember, AppError> {
        members::find_member(txn, session_id, user_id)
            .await?
            .ok_or_else(|| {
                reject(
                    ConflictKind::UserNotInSession,
                    "That user is not part of this session",
                )
            })
    }
}
