//! DTOs for sessions_sea adapter.

use time::OffsetDateTime;

/// DTO for creating a new session.
#[derive(Debug, Clone)]
pub struct SessionCreate {
    pub guild_id: String,
    pub goal: i32,
    pub restrictions_per_round: i32,
}

/// Unified DTO for updating session fields with optimistic locking.
///
/// Any combination of fields is written atomically with a single version bump.
#[derive(Debug, Clone)]
pub struct SessionUpdate {
    pub id: i64,
    pub started_at: Option<OffsetDateTime>,
    pub successful_rounds: Option<i32>,
    /// Final score and finish timestamp, written together
    pub finish: Option<(i64, OffsetDateTime)>,
    pub expected_version: i32,
}

impl SessionUpdate {
    pub fn new(id: i64, expected_version: i32) -> Self {
        Self {
            id,
            started_at: None,
            successful_rounds: None,
            finish: None,
            expected_version,
        }
    }

    pub fn with_started_at(mut self, started_at: OffsetDateTime) -> Self {
        self.started_at = Some(started_at);
        self
    }

    pub fn with_successful_rounds(mut self, rounds: i32) -> Self {
        self.successful_rounds = Some(rounds);
        self
    }

    pub fn finished(mut self, score: i64, at: OffsetDateTime) -> Self {
        self.finish = Some((score, at));
        self
    }
}
