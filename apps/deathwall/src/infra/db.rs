use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbKind, RuntimeEnv};
use crate::error::AppError;

/// Repository calls must fail rather than wait forever for a connection.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

fn connect_options(url: &str, db_kind: DbKind) -> ConnectOptions {
    let mut opt = ConnectOptions::new(url);
    opt.acquire_timeout(ACQUIRE_TIMEOUT).sqlx_logging(false);
    match db_kind {
        // Every connection to sqlite::memory: is its own database, so the
        // pool must never open a second one.
        DbKind::SqliteMemory => {
            opt.min_connections(1).max_connections(1);
        }
        DbKind::SqliteFile => {
            opt.max_connections(4);
        }
        DbKind::Postgres => {
            opt.max_connections(16);
        }
    }
    opt
}

/// Connect without running migrations.
pub async fn connect_db(env: RuntimeEnv, db_kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let url = db_url(env, db_kind)?;
    let conn = Database::connect(connect_options(&url, db_kind)).await?;
    Ok(conn)
}

/// Connect and bring the schema up to date on the returned connection.
pub async fn bootstrap_db(
    env: RuntimeEnv,
    db_kind: DbKind,
) -> Result<DatabaseConnection, AppError> {
    info!(?env, ?db_kind, "bootstrap=start");
    let conn = connect_db(env, db_kind).await?;
    migrate(&conn, MigrationCommand::Up).await?;
    info!("bootstrap=ready");
    Ok(conn)
}
