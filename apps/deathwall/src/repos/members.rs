//! Session membership repository functions.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use serde::Serialize;

use crate::adapters::members_sea::{self as members_adapter, MemberCreate};
use crate::entities::session_members;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionMember {
    pub id: i64,
    pub session_id: i64,
    pub user_id: String,
    pub is_leader: bool,
}

impl From<session_members::Model> for SessionMember {
    fn from(model: session_members::Model) -> Self {
        Self {
            id: model.id,
            session_id: model.session_id,
            user_id: model.user_id,
            is_leader: model.is_leader,
        }
    }
}

pub async fn find_member<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i64,
    user_id: &str,
) -> Result<Option<SessionMember>, DomainError> {
    let member = members_adapter::find_member(conn, session_id, user_id).await?;
    Ok(member.map(SessionMember::from))
}

/// Members of a session, leader first.
pub async fn find_all_by_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i64,
) -> Result<Vec<SessionMember>, DomainError> {
    let members = members_adapter::find_all_by_session(conn, session_id).await?;
    Ok(members.into_iter().map(SessionMember::from).collect())
}

pub async fn add_leader(
    txn: &DatabaseTransaction,
    session_id: i64,
    user_id: &str,
) -> Result<SessionMember, DomainError> {
    let member = members_adapter::create_member(txn, MemberCreate::leader(session_id, user_id)).await?;
    Ok(SessionMember::from(member))
}

pub async fn add_member(
    txn: &DatabaseTransaction,
    session_id: i64,
    user_id: &str,
) -> Result<SessionMember, DomainError> {
    let member = members_adapter::create_member(txn, MemberCreate::member(session_id, user_id)).await?;
    Ok(SessionMember::from(member))
}

pub async fn remove_member(txn: &DatabaseTransaction, member_id: i64) -> Result<(), DomainError> {
    members_adapter::delete_member(txn, member_id).await?;
    Ok(())
}
