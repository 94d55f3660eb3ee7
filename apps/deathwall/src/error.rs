use thiserror::Error;

use crate::errors::domain::{
    ConflictKind, DomainError, ExhaustionKind, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::errors::ErrorCode;

/// Coarse classification the command layer uses to decide how to reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User-facing, non-retryable, surfaced verbatim
    DomainConflict,
    /// "Cannot proceed" - never retried automatically
    ResourceExhaustion,
    /// Rejected input (bad goal, unknown ghost, no active round)
    InvalidRequest,
    /// Referenced session/member/round does not exist
    NotFound,
    /// Repository timeout or unavailability; retry with backoff
    InfrastructureFailure,
    /// Bugs and misconfiguration
    Internal,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Cannot proceed: {detail}")]
    Exhausted { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Database unavailable: {detail}")]
    DbUnavailable { detail: String },
    #[error("Database timeout: {detail}")]
    Timeout { detail: String },
    #[error("Data corruption: {detail}")]
    DataCorruption { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    /// Helper method to extract error code from any error variant
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::Conflict { code, .. } => *code,
            AppError::Exhausted { code, .. } => *code,
            AppError::NotFound { code, .. } => *code,
            AppError::Db { .. } => ErrorCode::DbError,
            AppError::DbUnavailable { .. } => ErrorCode::DbUnavailable,
            AppError::Timeout { .. } => ErrorCode::DbTimeout,
            AppError::DataCorruption { .. } => ErrorCode::DataCorruption,
            AppError::Internal { .. } => ErrorCode::Internal,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// Helper method to extract error detail from any error variant
    pub fn detail(&self) -> &str {
        match self {
            AppError::Validation { detail, .. }
            | AppError::Conflict { detail, .. }
            | AppError::Exhausted { detail, .. }
            | AppError::NotFound { detail, .. }
            | AppError::Db { detail }
            | AppError::DbUnavailable { detail }
            | AppError::Timeout { detail }
            | AppError::DataCorruption { detail }
            | AppError::Internal { detail }
            | AppError::Config { detail } => detail,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::Validation { .. } => ErrorCategory::InvalidRequest,
            AppError::Conflict { .. } => ErrorCategory::DomainConflict,
            AppError::Exhausted { .. } => ErrorCategory::ResourceExhaustion,
            AppError::NotFound { .. } => ErrorCategory::NotFound,
            AppError::Db { .. } | AppError::DbUnavailable { .. } | AppError::Timeout { .. } => {
                ErrorCategory::InfrastructureFailure
            }
            AppError::DataCorruption { .. }
            | AppError::Internal { .. }
            | AppError::Config { .. } => ErrorCategory::Internal,
        }
    }

    /// Infrastructure failures and lost optimistic-lock races are worth
    /// retrying; everything else is a definitive answer for the user.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::Conflict {
                code: ErrorCode::OptimisticLock,
                ..
            }
        ) || self.category() == ErrorCategory::InfrastructureFailure
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(kind, detail) => {
                let code = match kind {
                    ValidationKind::InvalidGoal => ErrorCode::InvalidGoal,
                    ValidationKind::InvalidRestrictionCount => ErrorCode::InvalidRestrictionCount,
                    ValidationKind::InvalidGhostType => ErrorCode::InvalidGhostType,
                    ValidationKind::NoActiveRound => ErrorCode::NoActiveRound,
                    ValidationKind::CorruptMetadata => {
                        return AppError::DataCorruption { detail };
                    }
                    ValidationKind::Other(_) => ErrorCode::ValidationError,
                };
                AppError::Validation { code, detail }
            }
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::AlreadyInSession => ErrorCode::AlreadyInSession,
                    ConflictKind::NotLeader => ErrorCode::NotLeader,
                    ConflictKind::RoundAlreadyActive => ErrorCode::RoundAlreadyActive,
                    ConflictKind::RoundAlreadyResolved => ErrorCode::RoundAlreadyResolved,
                    ConflictKind::UserNotInSession => ErrorCode::UserNotInSession,
                    ConflictKind::SessionAlreadyStarted => ErrorCode::SessionAlreadyStarted,
                    ConflictKind::SessionFinished => ErrorCode::SessionFinished,
                    ConflictKind::LeaderRemoval => ErrorCode::LeaderRemoval,
                    ConflictKind::OptimisticLock => ErrorCode::OptimisticLock,
                    ConflictKind::Other(_) => ErrorCode::Conflict,
                };
                AppError::Conflict { code, detail }
            }
            DomainError::Exhausted(kind, detail) => {
                let code = match kind {
                    ExhaustionKind::NoRestrictionsAvailable => ErrorCode::NoRestrictionsAvailable,
                    ExhaustionKind::PoolExhausted => ErrorCode::PoolExhausted,
                };
                AppError::Exhausted { code, detail }
            }
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::Session => ErrorCode::SessionNotFound,
                    NotFoundKind::Member => ErrorCode::MemberNotFound,
                    NotFoundKind::Round => ErrorCode::RoundNotFound,
                    NotFoundKind::Other(_) => ErrorCode::NotFound,
                };
                AppError::NotFound { code, detail }
            }
            DomainError::Infra(kind, detail) => match kind {
                InfraErrorKind::Timeout => AppError::Timeout { detail },
                InfraErrorKind::DbUnavailable => AppError::DbUnavailable { detail },
                InfraErrorKind::DataCorruption => AppError::DataCorruption { detail },
                InfraErrorKind::Other(_) => AppError::Db { detail },
            },
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::from(crate::infra::db_errors::map_db_err(e))
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::config(format!("env var error: {e}"))
    }
}
