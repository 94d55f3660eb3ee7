use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Sessions {
    Table,
    Id,
    GuildId,
    Goal,
    RestrictionsPerRound,
    SuccessfulRounds,
    Finished,
    Score,
    StartedAt,
    FinishedAt,
    CreatedAt,
    UpdatedAt,
    LockVersion,
}

#[derive(Iden)]
enum SessionMembers {
    Table,
    Id,
    SessionId,
    UserId,
    IsLeader,
    CreatedAt,
}

#[derive(Iden)]
enum SessionRounds {
    Table,
    Id,
    SessionId,
    StartedById,
    Won,
    GhostType,
    StartedAt,
    FinishedAt,
}

#[derive(Iden)]
enum SessionRestrictions {
    Table,
    Id,
    SessionId,
    RoundId,
    RestrictionId,
    Metadata,
    CreatedAt,
}

fn pk<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .primary_key()
        .auto_increment()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // sessions
        manager
            .create_table(
                Table::create()
                    .table(Sessions::Table)
                    .if_not_exists()
                    .col(pk(Sessions::Id))
                    .col(ColumnDef::new(Sessions::GuildId).string().not_null())
                    .col(ColumnDef::new(Sessions::Goal).integer().not_null())
                    .col(
                        ColumnDef::new(Sessions::RestrictionsPerRound)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Sessions::SuccessfulRounds)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Sessions::Finished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Sessions::Score).big_integer().null())
                    .col(
                        ColumnDef::new(Sessions::StartedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Sessions::FinishedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Sessions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Sessions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Sessions::LockVersion)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_sessions_guild_finished")
                    .table(Sessions::Table)
                    .col(Sessions::GuildId)
                    .col(Sessions::Finished)
                    .to_owned(),
            )
            .await?;

        // session_members
        manager
            .create_table(
                Table::create()
                    .table(SessionMembers::Table)
                    .if_not_exists()
                    .col(pk(SessionMembers::Id))
                    .col(
                        ColumnDef::new(SessionMembers::SessionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SessionMembers::UserId).string().not_null())
                    .col(
                        ColumnDef::new(SessionMembers::IsLeader)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(SessionMembers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_session_members_session_id")
                            .from(SessionMembers::Table, SessionMembers::SessionId)
                            .to(Sessions::Table, Sessions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_session_members_session_user")
                    .table(SessionMembers::Table)
                    .col(SessionMembers::SessionId)
                    .col(SessionMembers::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_session_members_user_id")
                    .table(SessionMembers::Table)
                    .col(SessionMembers::UserId)
                    .to_owned(),
            )
            .await?;

        // session_rounds
        manager
            .create_table(
                Table::create()
                    .table(SessionRounds::Table)
                    .if_not_exists()
                    .col(pk(SessionRounds::Id))
                    .col(
                        ColumnDef::new(SessionRounds::SessionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SessionRounds::StartedById)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SessionRounds::Won).boolean().null())
                    .col(ColumnDef::new(SessionRounds::GhostType).string().null())
                    .col(
                        ColumnDef::new(SessionRounds::StartedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SessionRounds::FinishedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_session_rounds_session_id")
                            .from(SessionRounds::Table, SessionRounds::SessionId)
                            .to(Sessions::Table, Sessions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_session_rounds_started_by_id")
                            .from(SessionRounds::Table, SessionRounds::StartedById)
                            .to(SessionMembers::Table, SessionMembers::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_session_rounds_session_id")
                    .table(SessionRounds::Table)
                    .col(SessionRounds::SessionId)
                    .to_owned(),
            )
            .await?;

        // session_restrictions
        manager
            .create_table(
                Table::create()
                    .table(SessionRestrictions::Table)
                    .if_not_exists()
                    .col(pk(SessionRestrictions::Id))
                    .col(
                        ColumnDef::new(SessionRestrictions::SessionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SessionRestrictions::RoundId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SessionRestrictions::RestrictionId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SessionRestrictions::Metadata)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SessionRestrictions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_session_restrictions_session_id")
                            .from(SessionRestrictions::Table, SessionRestrictions::SessionId)
                            .to(Sessions::Table, Sessions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_session_restrictions_round_id")
                            .from(SessionRestrictions::Table, SessionRestrictions::RoundId)
                            .to(SessionRounds::Table, SessionRounds::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_session_restrictions_session_id")
                    .table(SessionRestrictions::Table)
                    .col(SessionRestrictions::SessionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_session_restrictions_round_id")
                    .table(SessionRestrictions::Table)
                    .col(SessionRestrictions::RoundId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse dependency order; indexes go with their tables
        manager
            .drop_table(
                Table::drop()
                    .table(SessionRestrictions::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(SessionRounds::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .table(SessionMembers::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Sessions::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}
