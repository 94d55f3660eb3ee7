//! DTOs for rounds_sea adapter.

/// DTO for starting a round.
#[derive(Debug, Clone)]
pub struct RoundCreate {
    pub session_id: i64,
    pub started_by_id: i64,
}

/// DTO for the one-time resolution of a round.
#[derive(Debug, Clone)]
pub struct RoundResolve {
    pub round_id: i64,
    pub won: bool,
    pub ghost_type: String,
}
