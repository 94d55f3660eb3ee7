//! SeaORM adapter for session rounds.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::session_rounds;

pub mod dto;

pub use dto::{RoundCreate, RoundResolve};

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Option<session_rounds::Model>, sea_orm::DbErr> {
    session_rounds::Entity::find_by_id(round_id).one(conn).await
}

/// The unresolved round of a session, if any.
pub async fn find_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i64,
) -> Result<Option<session_rounds::Model>, sea_orm::DbErr> {
    session_rounds::Entity::find()
        .filter(session_rounds::Column::SessionId.eq(session_id))
        .filter(session_rounds::Column::Won.is_null())
        .order_by_desc(session_rounds::Column::Id)
        .one(conn)
        .await
}

/// All rounds of a session in start order.
pub async fn find_all_by_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i64,
) -> Result<Vec<session_rounds::Model>, sea_orm::DbErr> {
    session_rounds::Entity::find()
        .filter(session_rounds::Column::SessionId.eq(session_id))
        .order_by_asc(session_rounds::Column::Id)
        .all(conn)
        .await
}

pub async fn create_round(
    txn: &DatabaseTransaction,
    dto: RoundCreate,
) -> Result<session_rounds::Model, sea_orm::DbErr> {
    let round = session_rounds::ActiveModel {
        id: NotSet,
        session_id: Set(dto.session_id),
        started_by_id: Set(dto.started_by_id),
        won: Set(None),
        ghost_type: Set(None),
        started_at: Set(time::OffsetDateTime::now_utc()),
        finished_at: Set(None),
    };

    round.insert(txn).await
}

/// Write the outcome of a round. Outcome columns are write-once: the update
/// only matches while `won` is still NULL.
pub async fn resolve_round(
    txn: &DatabaseTransaction,
    dto: RoundResolve,
) -> Result<session_rounds::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    let result = session_rounds::Entity::update_many()
        .col_expr(session_rounds::Column::Won, Expr::value(Some(dto.won)))
        .col_expr(
            session_rounds::Column::GhostType,
            Expr::value(Some(dto.ghost_type)),
        )
        .col_expr(session_rounds::Column::FinishedAt, Expr::value(Some(now)))
        .filter(session_rounds::Column::Id.eq(dto.round_id))
        .filter(session_rounds::Column::Won.is_null())
        .exec(txn)
        .await?;

    if result.rows_affected == 0 {
        return match find_by_id(txn, dto.round_id).await? {
            Some(_) => Err(sea_orm::DbErr::Custom(format!(
                "ROUND_ALREADY_RESOLVED:{}",
                dto.round_id
            ))),
            None => Err(sea_orm::DbErr::RecordNotFound("Round not found".to_string())),
        };
    }

    find_by_id(txn, dto.round_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Round not found".to_string()))
}
