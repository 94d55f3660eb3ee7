//! DTOs for members_sea adapter.

/// DTO for adding a member to a session.
#[derive(Debug, Clone)]
pub struct MemberCreate {
    pub session_id: i64,
    pub user_id: String,
    pub is_leader: bool,
}

impl MemberCreate {
    pub fn leader(session_id: i64, user_id: impl Into<String>) -> Self {
        Self {
            session_id,
            user_id: user_id.into(),
            is_leader: true,
        }
    }

    pub fn member(session_id: i64, user_id: impl Into<String>) -> Self {
        Self {
            session_id,
            user_id: user_id.into(),
            is_leader: false,
        }
    }
}
