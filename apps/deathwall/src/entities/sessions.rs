use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "guild_id")]
    pub guild_id: String,
    pub goal: i32,
    #[sea_orm(column_name = "restrictions_per_round")]
    pub restrictions_per_round: i32,
    #[sea_orm(column_name = "successful_rounds")]
    pub successful_rounds: i32,
    pub finished: bool,
    pub score: Option<i64>,
    #[sea_orm(column_name = "started_at")]
    pub started_at: Option<OffsetDateTime>,
    #[sea_orm(column_name = "finished_at")]
    pub finished_at: Option<OffsetDateTime>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
    #[sea_orm(column_name = "lock_version")]
    pub lock_version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::session_members::Entity")]
    SessionMembers,
    #[sea_orm(has_many = "super::session_rounds::Entity")]
    SessionRounds,
}

impl Related<super::session_members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SessionMembers.def()
    }
}

impl Related<super::session_rounds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SessionRounds.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
