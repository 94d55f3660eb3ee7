//! SeaORM -> DomainError translation.
//!
//! Adapters return `sea_orm::DbErr`; repos convert it here, and higher layers
//! map `DomainError` to `AppError` via `From`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Membership uniqueness is the only constraint with a user-facing meaning.
fn is_membership_unique_violation(msg: &str) -> bool {
    msg.contains("session_members.session_id") || msg.contains("ux_session_members_session_user")
}

fn parse_id(msg: &str, prefix: &str) -> Option<i64> {
    msg.strip_prefix(prefix)?.trim().parse().ok()
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();

    match &e {
        sea_orm::DbErr::RecordNotFound(what) => {
            let kind = if what.starts_with("Round") {
                NotFoundKind::Round
            } else if what.starts_with("Member") {
                NotFoundKind::Member
            } else {
                NotFoundKind::Other("Record".into())
            };
            return DomainError::not_found(kind, what.clone());
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with("SESSION_NOT_FOUND:") => {
            return match parse_id(msg, "SESSION_NOT_FOUND:") {
                Some(session_id) => {
                    warn!(session_id, "Session not found");
                    DomainError::not_found(
                        NotFoundKind::Session,
                        format!("Session {session_id} not found"),
                    )
                }
                None => DomainError::not_found(NotFoundKind::Session, "Session not found"),
            };
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with("ROUND_ALREADY_RESOLVED:") => {
            let round_id = parse_id(msg, "ROUND_ALREADY_RESOLVED:");
            warn!(?round_id, "Round outcome already written");
            return DomainError::conflict(
                ConflictKind::RoundAlreadyResolved,
                "This round has already been resolved",
            );
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with("OPTIMISTIC_LOCK:") => {
            #[derive(serde::Deserialize)]
            struct LockInfo {
                expected: i32,
                actual: i32,
            }

            if let Some(info) = msg
                .strip_prefix("OPTIMISTIC_LOCK:")
                .and_then(|json| serde_json::from_str::<LockInfo>(json).ok())
            {
                warn!(
                    expected = info.expected,
                    actual = info.actual,
                    "Optimistic lock conflict detected"
                );
                return DomainError::conflict(
                    ConflictKind::OptimisticLock,
                    format!(
                        "Session was modified concurrently (expected version {}, actual version {}). Please retry.",
                        info.expected, info.actual
                    ),
                );
            }

            warn!("Optimistic lock conflict detected (version info unavailable)");
            return DomainError::conflict(
                ConflictKind::OptimisticLock,
                "Session was modified by another command; please retry",
            );
        }
        sea_orm::DbErr::ConnectionAcquire(_) => {
            warn!(raw_error = %error_msg, "Timed out acquiring a database connection");
            return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
        }
        sea_orm::DbErr::Conn(_) => {
            warn!(raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(raw_error = %error_msg, "Unique constraint violation");
        if is_membership_unique_violation(&error_msg) {
            return DomainError::conflict(
                ConflictKind::AlreadyInSession,
                "User is already a member of this session",
            );
        }
        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(raw_error = %error_msg, "Foreign key constraint violation");
        return DomainError::validation(
            crate::errors::domain::ValidationKind::Other("ForeignKey".into()),
            "Foreign key constraint violation",
        );
    }

    if error_msg.contains("database is locked")
        || error_msg.contains("timeout")
        || error_msg.contains("timed out")
    {
        warn!(raw_error = %error_msg, "Database timeout or lock contention");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        map_db_err(e)
    }
}
