//! Entry points for the command layer.
//!
//! Every operation runs as one transaction: checks and the writes that depend
//! on them commit together, and any error rolls the whole command back.

use crate::db::txn::with_txn;
use crate::domain::scoring::ScoreBreakdown;
use crate::domain::settings::GameSettings;
use crate::error::AppError;
use crate::repos::{sessions, RestrictionInstance, Session, SessionMember, SessionRound};
use crate::services::history::HistoryService;
use crate::services::rounds::{RoundResult, RoundService, RoundStart};
use crate::services::scores::ScoreService;
use crate::services::sessions::{SessionOverview, SessionService};
use crate::state::app_state::AppState;

#[derive(Debug, Clone)]
pub struct SessionCoordinator {
    state: AppState,
}

impl SessionCoordinator {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    fn rounds(&self) -> RoundService {
        RoundService::new(self.state.config.clone(), self.state.rng.clone())
    }

    /// `restrictions_per_round` falls back to the configured default.
    pub async fn create_session(
        &self,
        guild_id: &str,
        leader_user_id: &str,
        goal: u32,
        restrictions_per_round: Option<u32>,
    ) -> Result<Session, AppError> {
        let guild_id = guild_id.to_string();
        let leader = leader_user_id.to_string();
        let per_round =
            restrictions_per_round.unwrap_or(self.state.config.default_restrictions_per_round);

        with_txn(&self.state, move |txn| {
            Box::pin(async move {
                SessionService::new()
                    .create_session(txn, &guild_id, &leader, goal, per_round)
                    .await
            })
        })
        .await
    }

    pub async fn invite_member(
        &self,
        session_id: i64,
        actor_user_id: &str,
        user_id: &str,
    ) -> Result<SessionMember, AppError> {
        let actor = actor_user_id.to_string();
        let user = user_id.to_string();

        with_txn(&self.state, move |txn| {
            Box::pin(async move {
                SessionService::new()
                    .invite_member(txn, session_id, &actor, &user)
                    .await
            })
        })
        .await
    }

    pub async fn remove_member(
        &self,
        session_id: i64,
        actor_user_id: &str,
        user_id: &str,
    ) -> Result<(), AppError> {
        let actor = actor_user_id.to_string();
        let user = user_id.to_string();

        with_txn(&self.state, move |txn| {
            Box::pin(async move {
                SessionService::new()
                    .remove_member(txn, session_id, &actor, &user)
                    .await
            })
        })
        .await
    }

    pub async fn leave_session(&self, session_id: i64, user_id: &str) -> Result<(), AppError> {
        let user = user_id.to_string();

        with_txn(&self.state, move |txn| {
            Box::pin(async move {
                SessionService::new()
                    .leave_session(txn, session_id, &user)
                    .await
            })
        })
        .await
    }

    pub async fn list_members(&self, session_id: i64) -> Result<Vec<SessionMember>, AppError> {
        with_txn(&self.state, move |txn| {
            Box::pin(async move { SessionService::new().list_members(txn, session_id).await })
        })
        .await
    }

    pub async fn find_active_session(
        &self,
        guild_id: &str,
        user_id: &str,
    ) -> Result<Option<Session>, AppError> {
        let guild_id = guild_id.to_string();
        let user = user_id.to_string();

        with_txn(&self.state, move |txn| {
            Box::pin(async move {
                SessionService::new()
                    .find_active_session(txn, &guild_id, &user)
                    .await
            })
        })
        .await
    }

    pub async fn session_overview(&self, session_id: i64) -> Result<SessionOverview, AppError> {
        with_txn(&self.state, move |txn| {
            Box::pin(async move { SessionService::new().session_overview(txn, session_id).await })
        })
        .await
    }

    pub async fn start_round(
        &self,
        session_id: i64,
        initiator_user_id: &str,
    ) -> Result<RoundStart, AppError> {
        let rounds = self.rounds();
        let initiator = initiator_user_id.to_string();

        with_txn(&self.state, move |txn| {
            Box::pin(async move { rounds.start_round(txn, session_id, &initiator).await })
        })
        .await
    }

    pub async fn resolve_round(
        &self,
        session_id: i64,
        won: bool,
        ghost_tag: &str,
    ) -> Result<RoundResult, AppError> {
        let rounds = self.rounds();
        let ghost = ghost_tag.to_string();

        with_txn(&self.state, move |txn| {
            Box::pin(async move { rounds.resolve_round(txn, session_id, won, &ghost).await })
        })
        .await
    }

    pub async fn current_settings(&self, session_id: i64) -> Result<GameSettings, AppError> {
        with_txn(&self.state, move |txn| {
            Box::pin(async move { HistoryService::new().current_settings(txn, session_id).await })
        })
        .await
    }

    pub async fn list_restriction_history(
        &self,
        session_id: i64,
    ) -> Result<Vec<RestrictionInstance>, AppError> {
        with_txn(&self.state, move |txn| {
            Box::pin(async move {
                HistoryService::new()
                    .list_restriction_history(txn, session_id)
                    .await
            })
        })
        .await
    }

    pub async fn list_rounds(&self, session_id: i64) -> Result<Vec<SessionRound>, AppError> {
        with_txn(&self.state, move |txn| {
            Box::pin(async move { HistoryService::new().list_rounds(txn, session_id).await })
        })
        .await
    }

    /// Score the session as it stands. Finished sessions already carry
    /// their persisted score; this recomputes it from history.
    pub async fn compute_final_score(&self, session_id: i64) -> Result<ScoreBreakdown, AppError> {
        let scores = ScoreService::new(self.state.config.catalog.clone());

        with_txn(&self.state, move |txn| {
            Box::pin(async move {
                let session = sessions::require_session(txn, session_id).await?;
                scores.compute_final_score(txn, &session).await
            })
        })
        .await
    }
}
