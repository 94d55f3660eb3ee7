// Unit tests for error mapping - pure domain logic without database dependencies
use crate::error::ErrorCategory;
use crate::errors::domain::{
    ConflictKind, DomainError, ExhaustionKind, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::{AppError, ErrorCode};

#[test]
fn maps_membership_conflicts() {
    let app: AppError =
        DomainError::conflict(ConflictKind::AlreadyInSession, "already playing").into();
    assert_eq!(app.code(), ErrorCode::AlreadyInSession);
    assert_eq!(app.category(), ErrorCategory::DomainConflict);
    assert!(!app.is_retryable());

    let app: AppError = DomainError::conflict(ConflictKind::NotLeader, "not the leader").into();
    assert_eq!(app.code().as_str(), "NOT_LEADER");

    let app: AppError =
        DomainError::conflict(ConflictKind::Other("misc".into()), "generic").into();
    assert_eq!(app.code(), ErrorCode::Conflict);
}

#[test]
fn optimistic_lock_conflict_is_retryable() {
    let app: AppError =
        DomainError::conflict(ConflictKind::OptimisticLock, "modified concurrently").into();
    assert_eq!(app.code(), ErrorCode::OptimisticLock);
    assert_eq!(app.category(), ErrorCategory::DomainConflict);
    assert!(app.is_retryable());
}

#[test]
fn maps_exhaustion_to_cannot_proceed() {
    let app: AppError = DomainError::exhausted(
        ExhaustionKind::PoolExhausted,
        "No new restrictions can be added",
    )
    .into();
    assert_eq!(app.code(), ErrorCode::PoolExhausted);
    assert_eq!(app.category(), ErrorCategory::ResourceExhaustion);
    assert!(!app.is_retryable());
    assert_eq!(app.detail(), "No new restrictions can be added");
}

#[test]
fn maps_validation() {
    let app: AppError =
        DomainError::validation(ValidationKind::NoActiveRound, "no round to end").into();
    assert_eq!(app.code(), ErrorCode::NoActiveRound);
    assert_eq!(app.category(), ErrorCategory::InvalidRequest);

    // Corrupt stored metadata is our fault, not the caller's
    let app: AppError =
        DomainError::validation(ValidationKind::CorruptMetadata, "bad json").into();
    assert!(matches!(app, AppError::DataCorruption { .. }));
}

#[test]
fn maps_not_found() {
    let app: AppError = DomainError::not_found(NotFoundKind::Session, "no session").into();
    assert_eq!(app.code().as_str(), "SESSION_NOT_FOUND");
    assert_eq!(app.category(), ErrorCategory::NotFound);
}

#[test]
fn maps_infra_as_retryable() {
    let app: AppError = DomainError::infra(InfraErrorKind::Timeout, "timeout").into();
    assert_eq!(app.code().as_str(), "DB_TIMEOUT");
    assert!(matches!(app, AppError::Timeout { .. }));
    assert!(app.is_retryable());

    let app: AppError = DomainError::infra(InfraErrorKind::DbUnavailable, "down").into();
    assert_eq!(app.code(), ErrorCode::DbUnavailable);
    assert!(app.is_retryable());

    let app: AppError = DomainError::infra(InfraErrorKind::DataCorruption, "bad row").into();
    assert!(!app.is_retryable());
}
