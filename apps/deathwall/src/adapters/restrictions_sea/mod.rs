//! SeaORM adapter for restriction instances. Rows are append-only.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::session_restrictions;

pub mod dto;

pub use dto::RestrictionCreate;

/// Every instance recorded for a session, in insertion order.
pub async fn find_all_by_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i64,
) -> Result<Vec<session_restrictions::Model>, sea_orm::DbErr> {
    session_restrictions::Entity::find()
        .filter(session_restrictions::Column::SessionId.eq(session_id))
        .order_by_asc(session_restrictions::Column::Id)
        .all(conn)
        .await
}

/// Insert a batch of instances. Must run inside the transaction that created
/// the round so the round and its instances commit together.
pub async fn create_many(
    txn: &DatabaseTransaction,
    dtos: Vec<RestrictionCreate>,
) -> Result<Vec<session_restrictions::Model>, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let mut created = Vec::with_capacity(dtos.len());

    for dto in dtos {
        let active = session_restrictions::ActiveModel {
            id: NotSet,
            session_id: Set(dto.session_id),
            round_id: Set(dto.round_id),
            restriction_id: Set(dto.restriction_id),
            metadata: Set(dto.metadata),
            created_at: Set(now),
        };
        created.push(active.insert(txn).await?);
    }

    Ok(created)
}
