use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::game::GameConfig;
use crate::domain::rng::SharedRng;

/// Shared resources every command runs against.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<GameConfig>,
    pub rng: SharedRng,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: GameConfig, rng: SharedRng) -> Self {
        Self {
            db,
            config: Arc::new(config),
            rng,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
