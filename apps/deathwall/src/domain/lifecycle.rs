//! Session and round state machines, and the streak termination rule.

use serde::Serialize;

/// Where a session is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionPhase {
    /// Created, accepting members, no round started yet
    Open,
    /// At least one round has started
    Active,
    Finished,
}

impl SessionPhase {
    pub fn of(started: bool, finished: bool) -> Self {
        match (started, finished) {
            (_, true) => SessionPhase::Finished,
            (true, false) => SessionPhase::Active,
            (false, false) => SessionPhase::Open,
        }
    }

    pub fn accepts_membership_changes(self) -> bool {
        self == SessionPhase::Open
    }
}

/// State of a single round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RoundState {
    Active,
    Won,
    Lost,
}

impl RoundState {
    pub fn from_outcome(won: Option<bool>) -> Self {
        match won {
            None => RoundState::Active,
            Some(true) => RoundState::Won,
            Some(false) => RoundState::Lost,
        }
    }
}

/// Wins and resolved rounds of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreakTally {
    pub wins: u32,
    pub played: u32,
}

impl StreakTally {
    /// Count resolved outcomes; unresolved rounds (`None`) are skipped.
    pub fn from_outcomes<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = Option<bool>>,
    {
        outcomes
            .into_iter()
            .flatten()
            .fold(Self::default(), |mut tally, won| {
                tally.played += 1;
                if won {
                    tally.wins += 1;
                }
                tally
            })
    }

    pub fn has_loss(&self) -> bool {
        self.wins < self.played
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Termination {
    Continue,
    GoalReached,
    StreakBroken,
}

/// A session continues while every resolved round was won and the goal is
/// not yet met. Reaching the goal is a win; any other end is a loss.
pub fn evaluate_termination(tally: StreakTally, goal: u32) -> Termination {
    if tally.wins >= goal {
        Termination::GoalReached
    } else if tally.has_loss() {
        Termination::StreakBroken
    } else {
        Termination::Continue
    }
}
