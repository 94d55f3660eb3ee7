use std::sync::Arc;

use deathwall::config::db::{DbKind, RuntimeEnv};
use deathwall::config::game::GameConfig;
use deathwall::domain::catalog::{OccurrenceCap, RestrictionTemplate, StaticCatalog};
use deathwall::infra::state::{build_state, StateBuilder};
use deathwall::state::app_state::AppState;
use deathwall::{AppError, SessionCoordinator};

/// Fixed seed so draws are reproducible across runs.
pub const TEST_SEED: u64 = 0xDEA7;

pub fn test_state_builder() -> StateBuilder {
    build_state()
        .with_env(RuntimeEnv::Test)
        .with_db(DbKind::SqliteMemory)
        .with_rng_seed(TEST_SEED)
}

/// Fresh migrated in-memory database with the built-in game data.
pub async fn build_test_state() -> Result<AppState, AppError> {
    test_state_builder().build().await
}

pub async fn coordinator() -> SessionCoordinator {
    SessionCoordinator::new(build_test_state().await.expect("build test state"))
}

/// Coordinator whose catalog holds exactly `templates`.
pub async fn coordinator_with(templates: Vec<RestrictionTemplate>) -> SessionCoordinator {
    let config = GameConfig::default().with_catalog(Arc::new(StaticCatalog::new(templates)));
    let state = test_state_builder()
        .with_config(config)
        .build()
        .await
        .expect("build test state");
    SessionCoordinator::new(state)
}

pub fn capped(id: &str, cap: u32, score: i64) -> RestrictionTemplate {
    RestrictionTemplate::new(id, OccurrenceCap::Limited(cap), score)
}
