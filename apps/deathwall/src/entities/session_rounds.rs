use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "session_rounds")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "session_id")]
    pub session_id: i64,
    #[sea_orm(column_name = "started_by_id")]
    pub started_by_id: i64,
    pub won: Option<bool>,
    #[sea_orm(column_name = "ghost_type")]
    pub ghost_type: Option<String>,
    #[sea_orm(column_name = "started_at")]
    pub started_at: OffsetDateTime,
    #[sea_orm(column_name = "finished_at")]
    pub finished_at: Option<OffsetDateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sessions::Entity",
        from = "Column::SessionId",
        to = "super::sessions::Column::Id"
    )]
    Session,
    #[sea_orm(
        belongs_to = "super::session_members::Entity",
        from = "Column::StartedById",
        to = "super::session_members::Column::Id"
    )]
    StartedBy,
    #[sea_orm(has_many = "super::session_restrictions::Entity")]
    SessionRestrictions,
}

impl Related<super::sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
}

impl Related<super::session_members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StartedBy.def()
    }
}

impl Related<super::session_restrictions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SessionRestrictions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
