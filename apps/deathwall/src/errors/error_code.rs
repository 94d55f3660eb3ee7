//! Error codes surfaced to the command layer.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and are stable across releases, since
//! the command layer keys its localized replies on them.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Membership and lifecycle conflicts
    AlreadyInSession,
    NotLeader,
    RoundAlreadyActive,
    RoundAlreadyResolved,
    UserNotInSession,
    SessionAlreadyStarted,
    SessionFinished,
    LeaderRemoval,
    OptimisticLock,
    Conflict,

    // Restriction pool exhaustion
    NoRestrictionsAvailable,
    PoolExhausted,

    // Request validation
    InvalidGoal,
    InvalidRestrictionCount,
    InvalidGhostType,
    NoActiveRound,
    ValidationError,

    // Resource not found
    SessionNotFound,
    MemberNotFound,
    RoundNotFound,
    NotFound,

    // System errors
    DbError,
    DbUnavailable,
    DbTimeout,
    DataCorruption,
    Internal,
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AlreadyInSession => "ALREADY_IN_SESSION",
            Self::NotLeader => "NOT_LEADER",
            Self::RoundAlreadyActive => "ROUND_ALREADY_ACTIVE",
            Self::RoundAlreadyResolved => "ROUND_ALREADY_RESOLVED",
            Self::UserNotInSession => "USER_NOT_IN_SESSION",
            Self::SessionAlreadyStarted => "SESSION_ALREADY_STARTED",
            Self::SessionFinished => "SESSION_FINISHED",
            Self::LeaderRemoval => "LEADER_REMOVAL",
            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::Conflict => "CONFLICT",

            Self::NoRestrictionsAvailable => "NO_RESTRICTIONS_AVAILABLE",
            Self::PoolExhausted => "POOL_EXHAUSTED",

            Self::InvalidGoal => "INVALID_GOAL",
            Self::InvalidRestrictionCount => "INVALID_RESTRICTION_COUNT",
            Self::InvalidGhostType => "INVALID_GHOST_TYPE",
            Self::NoActiveRound => "NO_ACTIVE_ROUND",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::MemberNotFound => "MEMBER_NOT_FOUND",
            Self::RoundNotFound => "ROUND_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
