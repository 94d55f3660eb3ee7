//! Final session score.

use serde::Serialize;

/// Points awarded per won round before the goal multiplier.
pub const BASE_POINTS_PER_WIN: i64 = 2;
/// Weight of the summed restriction scores of won rounds.
pub const DIFFICULTY_MULTIPLIER: i64 = 3;
pub const GOAL_REACHED_MULTIPLIER: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub score: i64,
    pub successful_rounds: u32,
    pub total_rounds: u32,
    pub goal_reached: bool,
    pub restriction_score: i64,
    pub completion_multiplier: f64,
    pub efficiency_rate: f64,
}

/// Combine round outcomes into the final score.
///
/// `restriction_score` is the sum of catalog scores of the restrictions
/// attached to won rounds. `rounds_played` counts resolved rounds; zero is
/// treated as one. Halves round up.
pub fn compute_final_score(
    goal: u32,
    successful_rounds: u32,
    rounds_played: u32,
    restriction_score: i64,
) -> ScoreBreakdown {
    let goal_reached = successful_rounds >= goal;
    let completion_multiplier = if goal_reached {
        GOAL_REACHED_MULTIPLIER
    } else {
        1.0
    };
    let total_rounds = rounds_played.max(1);
    let efficiency_rate = f64::from(successful_rounds) / f64::from(total_rounds);

    let round_points = BASE_POINTS_PER_WIN * i64::from(successful_rounds);
    let raw = (round_points as f64 * completion_multiplier
        + (restriction_score * DIFFICULTY_MULTIPLIER) as f64)
        * efficiency_rate;

    ScoreBreakdown {
        score: (raw + 0.5).floor() as i64,
        successful_rounds,
        total_rounds,
        goal_reached,
        restriction_score,
        completion_multiplier,
        efficiency_rate,
    }
}
