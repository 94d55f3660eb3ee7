//! DTOs for restrictions_sea adapter.

/// DTO for recording one restriction instance on a round.
#[derive(Debug, Clone)]
pub struct RestrictionCreate {
    pub session_id: i64,
    pub round_id: i64,
    pub restriction_id: String,
    /// Serialized effect metadata (JSON object)
    pub metadata: String,
}
