//! Round lifecycle: starting a round with fresh restrictions and resolving it.

use std::sync::Arc;

use sea_orm::DatabaseTransaction;
use serde::Serialize;
use tracing::{info, warn};

use super::scores::ScoreService;
use super::sessions::{ensure_not_finished, SessionOutcome, SessionService};
use crate::config::game::GameConfig;
use crate::domain::placeholders::resolve_placeholders;
use crate::domain::rng::SharedRng;
use crate::domain::sampler::{usage_counts, SamplerError};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::repos::{restrictions, rounds, sessions, NewRestriction, RestrictionInstance, SessionRound};

/// A freshly started round and the restrictions drawn for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundStart {
    pub round: SessionRound,
    pub restrictions: Vec<RestrictionInstance>,
}

/// A resolved round and what it meant for the session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
    pub round: SessionRound,
    pub outcome: SessionOutcome,
}

#[derive(Debug, Clone)]
pub struct RoundService {
    config: Arc<GameConfig>,
    rng: SharedRng,
}

impl RoundService {
    pub fn new(config: Arc<GameConfig>, rng: SharedRng) -> Self {
        Self { config, rng }
    }

    /// Start a round on behalf of `initiator_user_id`.
    ///
    /// Draws restrictions against the session's full history and persists the
    /// round together with its instances. Sampler failures leave nothing
    /// behind once the caller rolls the transaction back.
    pub async fn start_round(
        &self,
        txn: &DatabaseTransaction,
        session_id: i64,
        initiator_user_id: &str,
    ) -> Result<RoundStart, AppError> {
        let session = sessions::lock_session(txn, session_id).await?;
        ensure_not_finished(&session)?;
        let initiator = SessionService::new()
            .require_member(txn, session_id, initiator_user_id)
            .await?;

        if let Some(active) = rounds::find_active(txn, session_id).await? {
            warn!(session_id, round_id = active.id, "Round already active");
            return Err(DomainError::conflict(
                ConflictKind::RoundAlreadyActive,
                "A round is already in progress",
            )
            .into());
        }

        let history = restrictions::usage_history(txn, session_id).await?;
        let batch = self.draw_batch(&history, session.restrictions_per_round as usize)?;

        let round = rounds::create_round(txn, session_id, initiator.id).await?;
        let instances = restrictions::create_batch(txn, session_id, round.id, batch).await?;

        if !session.is_started() {
            sessions::mark_started(txn, &session, round.started_at).await?;
        }

        info!(
            session_id,
            round_id = round.id,
            restrictions = instances.len(),
            "Round started"
        );
        Ok(RoundStart {
            round,
            restrictions: instances,
        })
    }

    /// Pick templates and resolve their placeholders. Holds the RNG lock
    /// for the whole draw so one round's randomness is never interleaved.
    fn draw_batch(
        &self,
        history: &[String],
        desired: usize,
    ) -> Result<Vec<NewRestriction>, AppError> {
        let usage = usage_counts(history.iter().map(String::as_str));
        let catalog = self.config.catalog.as_ref();
        let sampler = self.config.sampler();

        self.rng.with(|rng| -> Result<Vec<NewRestriction>, AppError> {
            let picked = sampler
                .select(catalog, &usage, desired, rng)
                .map_err(|e: SamplerError| {
                    warn!(error = %e, "Restriction draw failed");
                    DomainError::from(e)
                })?;

            let mut batch = Vec::with_capacity(picked.len());
            for id in picked {
                let template = catalog.find(&id).ok_or_else(|| {
                    AppError::internal(format!("sampled restriction {id} is not in the catalog"))
                })?;
                batch.push(NewRestriction {
                    restriction_id: id,
                    metadata: resolve_placeholders(&template.effects, &self.config.items, rng),
                });
            }
            Ok(batch)
        })
    }

    /// Resolve the active round and evaluate whether the session ends.
    pub async fn resolve_round(
        &self,
        txn: &DatabaseTransaction,
        session_id: i64,
        won: bool,
        ghost_tag: &str,
    ) -> Result<RoundResult, AppError> {
        let session = sessions::lock_session(txn, session_id).await?;
        ensure_not_finished(&session)?;

        let active = rounds::find_active(txn, session_id).await?.ok_or_else(|| {
            warn!(session_id, "No active round to resolve");
            DomainError::validation(ValidationKind::NoActiveRound, "There is no round to end")
        })?;

        if !self.config.is_known_ghost(ghost_tag) {
            warn!(session_id, ghost_tag, "Unknown ghost type");
            return Err(DomainError::validation(
                ValidationKind::InvalidGhostType,
                format!("'{ghost_tag}' is not a known ghost type"),
            )
            .into());
        }

        let round = rounds::resolve_round(txn, active.id, won, ghost_tag).await?;
        let session = if won {
            sessions::record_win(txn, &session).await?
        } else {
            session
        };

        info!(
            session_id,
            round_id = round.id,
            won,
            successful_rounds = session.successful_rounds,
            "Round resolved"
        );

        let scores = ScoreService::new(self.config.catalog.clone());
        let outcome = SessionService::new()
            .evaluate_termination(txn, &session, &scores)
            .await?;

        Ok(RoundResult { round, outcome })
    }
}
