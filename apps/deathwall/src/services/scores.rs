//! Final score computation against stored history.

use std::collections::HashSet;
use std::sync::Arc;

use sea_orm::ConnectionTrait;
use tracing::warn;

use crate::domain::catalog::RestrictionCatalog;
use crate::domain::lifecycle::StreakTally;
use crate::domain::scoring::{compute_final_score, ScoreBreakdown};
use crate::error::AppError;
use crate::repos::{restrictions, rounds, RestrictionInstance, Session, SessionRound};

/// Sum of catalog scores for instances attached to won rounds.
///
/// Instances are matched to rounds by round id and to templates by template
/// id. An instance whose template is no longer in the catalog scores zero.
pub fn restriction_score(
    catalog: &dyn RestrictionCatalog,
    history: &[SessionRound],
    instances: &[RestrictionInstance],
) -> i64 {
    let won_rounds: HashSet<i64> = history
        .iter()
        .filter(|r| r.won == Some(true))
        .map(|r| r.id)
        .collect();

    instances
        .iter()
        .filter(|i| won_rounds.contains(&i.round_id))
        .map(|i| match catalog.find(&i.restriction_id) {
            Some(template) => template.score,
            None => {
                warn!(
                    restriction_id = %i.restriction_id,
                    round_id = i.round_id,
                    "Restriction missing from catalog; scoring it as zero"
                );
                0
            }
        })
        .sum()
}

#[derive(Debug, Clone)]
pub struct ScoreService {
    catalog: Arc<dyn RestrictionCatalog>,
}

impl ScoreService {
    pub fn new(catalog: Arc<dyn RestrictionCatalog>) -> Self {
        Self { catalog }
    }

    /// Score a session from its stored rounds and restrictions.
    pub async fn compute_final_score<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        session: &Session,
    ) -> Result<ScoreBreakdown, AppError> {
        let history = rounds::find_all_by_session(conn, session.id).await?;
        self.score_rounds(conn, session, &history).await
    }

    /// Score with an already loaded round history.
    pub async fn score_rounds<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        session: &Session,
        history: &[SessionRound],
    ) -> Result<ScoreBreakdown, AppError> {
        let instances = restrictions::find_all_by_session(conn, session.id).await?;
        let tally = StreakTally::from_outcomes(history.iter().map(|r| r.won));
        let restriction_score = restriction_score(self.catalog.as_ref(), history, &instances);

        Ok(compute_final_score(
            session.goal,
            tally.wins,
            tally.played,
            restriction_score,
        ))
    }
}
