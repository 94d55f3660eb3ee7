//! SeaORM adapter for session membership.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::session_members;

pub mod dto;

pub use dto::MemberCreate;

pub async fn find_member<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i64,
    user_id: &str,
) -> Result<Option<session_members::Model>, sea_orm::DbErr> {
    session_members::Entity::find()
        .filter(session_members::Column::SessionId.eq(session_id))
        .filter(session_members::Column::UserId.eq(user_id))
        .one(conn)
        .await
}

/// All members of a session, leader first, then in join order.
pub async fn find_all_by_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i64,
) -> Result<Vec<session_members::Model>, sea_orm::DbErr> {
    session_members::Entity::find()
        .filter(session_members::Column::SessionId.eq(session_id))
        .order_by_desc(session_members::Column::IsLeader)
        .order_by_asc(session_members::Column::Id)
        .all(conn)
        .await
}

pub async fn create_member(
    txn: &DatabaseTransaction,
    dto: MemberCreate,
) -> Result<session_members::Model, sea_orm::DbErr> {
    let member_active = session_members::ActiveModel {
        id: NotSet,
        session_id: Set(dto.session_id),
        user_id: Set(dto.user_id),
        is_leader: Set(dto.is_leader),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    member_active.insert(txn).await
}

pub async fn delete_member(txn: &DatabaseTransaction, member_id: i64) -> Result<(), sea_orm::DbErr> {
    session_members::Entity::delete_many()
        .filter(session_members::Column::Id.eq(member_id))
        .exec(txn)
        .await?;
    Ok(())
}
