use std::str::FromStr;

use deathwall::config::db::{DbKind, RuntimeEnv};
use deathwall::config::game::GameConfig;
use deathwall::infra::state::build_state;
use deathwall::telemetry;
use deathwall::SessionCoordinator;
use tracing::info;

#[tokio::main]
async fn main() {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - DEATHWALL_DB selects the engine (postgres | sqlite-file), default postgres
    // - DEATHWALL_CONFIG optionally points at a JSON game config
    let db_kind = match std::env::var("DEATHWALL_DB") {
        Ok(raw) => DbKind::from_str(&raw).unwrap_or_else(|e| {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }),
        Err(_) => DbKind::Postgres,
    };

    let config = match std::env::var("DEATHWALL_CONFIG") {
        Ok(path) => {
            let raw = std::fs::read_to_string(&path).unwrap_or_else(|e| {
                eprintln!("❌ Failed to read {path}: {e}");
                std::process::exit(1);
            });
            GameConfig::from_json(&raw).unwrap_or_else(|e| {
                eprintln!("❌ Invalid game config in {path}: {e}");
                std::process::exit(1);
            })
        }
        Err(_) => GameConfig::default(),
    };

    let state = match build_state()
        .with_env(RuntimeEnv::Prod)
        .with_db(db_kind)
        .with_config(config)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    let coordinator = SessionCoordinator::new(state);
    info!(
        restrictions = coordinator.state().config.catalog.list_templates().len(),
        ghost_types = coordinator.state().config.ghost_types.len(),
        "Deathwall core ready"
    );
}
