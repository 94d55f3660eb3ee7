//! SeaORM adapter for session repository - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseBackend, DatabaseTransaction,
    EntityTrait, JoinType, NotSet, QueryFilter, QuerySelect, RelationTrait, Set, Statement,
};
use xxhash_rust::xxh3::xxh3_64;

use crate::entities::{session_members, sessions};

pub mod dto;

pub use dto::{SessionCreate, SessionUpdate};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

fn session_not_found(session_id: i64) -> sea_orm::DbErr {
    sea_orm::DbErr::Custom(format!("SESSION_NOT_FOUND:{session_id}"))
}

/// Apply optimistic update with lock version check, then refetch.
///
/// Bumps `lock_version` and `updated_at`, filters on the expected version and
/// distinguishes a missing row from a version mismatch when nothing matched.
async fn optimistic_update_then_fetch<C, F>(
    conn: &C,
    id: i64,
    current_lock_version: i32,
    configure_update: F,
) -> Result<sessions::Model, sea_orm::DbErr>
where
    C: ConnectionTrait + Send + Sync,
    F: FnOnce(sea_orm::UpdateMany<sessions::Entity>) -> sea_orm::UpdateMany<sessions::Entity>,
{
    let now = time::OffsetDateTime::now_utc();

    let result = configure_update(sessions::Entity::update_many())
        .col_expr(sessions::Column::UpdatedAt, Expr::value(now))
        .col_expr(
            sessions::Column::LockVersion,
            Expr::col(sessions::Column::LockVersion).add(1),
        )
        .filter(sessions::Column::Id.eq(id))
        .filter(sessions::Column::LockVersion.eq(current_lock_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        let session = sessions::Entity::find_by_id(id).one(conn).await?;
        return match session {
            Some(session) => Err(sea_orm::DbErr::Custom(format!(
                "OPTIMISTIC_LOCK:{{\"expected\":{},\"actual\":{}}}",
                current_lock_version, session.lock_version
            ))),
            None => Err(session_not_found(id)),
        };
    }

    sessions::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| session_not_found(id))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i64,
) -> Result<Option<sessions::Model>, sea_orm::DbErr> {
    sessions::Entity::find_by_id(session_id).one(conn).await
}

/// Find session by ID or return a structured SESSION_NOT_FOUND error.
pub async fn require_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i64,
) -> Result<sessions::Model, sea_orm::DbErr> {
    find_by_id(conn, session_id)
        .await?
        .ok_or_else(|| session_not_found(session_id))
}

/// Read the session row with `FOR UPDATE` so concurrent mutators of the same
/// session serialize on it. SQLite has no row locks and ignores the clause.
pub async fn require_session_for_update(
    txn: &DatabaseTransaction,
    session_id: i64,
) -> Result<sessions::Model, sea_orm::DbErr> {
    sessions::Entity::find_by_id(session_id)
        .lock_exclusive()
        .one(txn)
        .await?
        .ok_or_else(|| session_not_found(session_id))
}

/// Advisory lock id for a user's membership slot in a guild.
fn membership_lock_key(guild_id: &str, user_id: &str) -> i64 {
    let key = format!("membership:{}:{guild_id}:{user_id}", guild_id.len());
    xxh3_64(key.as_bytes()) as i64
}

fn membership_lock_statement(backend: DatabaseBackend, lock_key: i64) -> Option<Statement> {
    match backend {
        DatabaseBackend::Postgres => Some(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            "SELECT pg_advisory_xact_lock($1)",
            vec![lock_key.into()],
        )),
        // SQLite serializes writers already.
        _ => None,
    }
}

/// Serialize membership checks for `(guild_id, user_id)` until the
/// transaction ends. Take it after any session row lock.
pub async fn lock_membership(
    txn: &DatabaseTransaction,
    guild_id: &str,
    user_id: &str,
) -> Result<(), sea_orm::DbErr> {
    let lock_key = membership_lock_key(guild_id, user_id);
    if let Some(stmt) = membership_lock_statement(txn.get_database_backend(), lock_key) {
        txn.execute(stmt).await?;
    }
    Ok(())
}

/// The unfinished session in `guild_id` that `user_id` belongs to, if any.
pub async fn find_unfinished_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    guild_id: &str,
    user_id: &str,
) -> Result<Option<sessions::Model>, sea_orm::DbErr> {
    sessions::Entity::find()
        .join(JoinType::InnerJoin, sessions::Relation::SessionMembers.def())
        .filter(sessions::Column::GuildId.eq(guild_id))
        .filter(sessions::Column::Finished.eq(false))
        .filter(session_members::Column::UserId.eq(user_id))
        .one(conn)
        .await
}

pub async fn create_session(
    txn: &DatabaseTransaction,
    dto: SessionCreate,
) -> Result<sessions::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let session_active = sessions::ActiveModel {
        id: NotSet,
        guild_id: Set(dto.guild_id),
        goal: Set(dto.goal),
        restrictions_per_round: Set(dto.restrictions_per_round),
        successful_rounds: Set(0),
        finished: Set(false),
        score: Set(None),
        started_at: Set(None),
        finished_at: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        lock_version: Set(1),
    };

    session_active.insert(txn).await
}

pub async fn update_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: SessionUpdate,
) -> Result<sessions::Model, sea_orm::DbErr> {
    optimistic_update_then_fetch(conn, dto.id, dto.expected_version, |mut update| {
        if let Some(started_at) = dto.started_at {
            update = update.col_expr(sessions::Column::StartedAt, Expr::value(Some(started_at)));
        }
        if let Some(rounds) = dto.successful_rounds {
            update = update.col_expr(sessions::Column::SuccessfulRounds, Expr::value(rounds));
        }
        if let Some((score, finished_at)) = dto.finish {
            update = update
                .col_expr(sessions::Column::Finished, Expr::value(true))
                .col_expr(sessions::Column::Score, Expr::value(Some(score)))
                .col_expr(sessions::Column::FinishedAt, Expr::value(Some(finished_at)));
        }
        update
    })
    .await
}
