//! Read-only views over a session's accumulated history.

use sea_orm::ConnectionTrait;

use crate::domain::settings::GameSettings;
use crate::error::AppError;
use crate::repos::{restrictions, rounds, sessions, RestrictionInstance, SessionRound};

#[derive(Debug, Default, Clone, Copy)]
pub struct HistoryService;

impl HistoryService {
    pub fn new() -> Self {
        Self
    }

    /// Baseline modifiers with every restriction ever added to the session
    /// folded in, across all rounds.
    pub async fn current_settings<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        session_id: i64,
    ) -> Result<GameSettings, AppError> {
        let instances = self.list_restriction_history(conn, session_id).await?;
        Ok(GameSettings::aggregate(instances.iter().map(|i| &i.metadata)))
    }

    pub async fn list_restriction_history<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        session_id: i64,
    ) -> Result<Vec<RestrictionInstance>, AppError> {
        sessions::require_session(conn, session_id).await?;
        Ok(restrictions::find_all_by_session(conn, session_id).await?)
    }

    /// Rounds in start order.
    pub async fn list_rounds<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        session_id: i64,
    ) -> Result<Vec<SessionRound>, AppError> {
        sessions::require_session(conn, session_id).await?;
        Ok(rounds::find_all_by_session(conn, session_id).await?)
    }
}
