//! Game configuration handed to every component that needs reference data.

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::catalog::{ItemPool, RestrictionCatalog, RestrictionTemplate, StaticCatalog};
use crate::domain::sampler::Sampler;
use crate::error::AppError;

pub const DEFAULT_RESTRICTIONS_PER_ROUND: u32 = 2;
pub const DEFAULT_UNLIMITED_WEIGHT: u32 = 1;

const BUILTIN_GHOST_TYPES: [&str; 24] = [
    "spirit",
    "wraith",
    "phantom",
    "poltergeist",
    "banshee",
    "jinn",
    "mare",
    "revenant",
    "shade",
    "demon",
    "yurei",
    "oni",
    "yokai",
    "hantu",
    "goryo",
    "myling",
    "onryo",
    "the_twins",
    "raiju",
    "obake",
    "the_mimic",
    "moroi",
    "deogen",
    "thaye",
];

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub catalog: Arc<dyn RestrictionCatalog>,
    pub items: ItemPool,
    pub ghost_types: Vec<String>,
    pub default_restrictions_per_round: u32,
    pub unlimited_weight: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            catalog: Arc::new(StaticCatalog::builtin()),
            items: ItemPool::builtin(),
            ghost_types: BUILTIN_GHOST_TYPES.iter().map(|g| g.to_string()).collect(),
            default_restrictions_per_round: DEFAULT_RESTRICTIONS_PER_ROUND,
            unlimited_weight: DEFAULT_UNLIMITED_WEIGHT,
        }
    }
}

/// JSON override shape. Missing sections fall back to the built-in values.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GameConfigFile {
    restrictions: Option<Vec<RestrictionTemplate>>,
    items: Option<ItemPool>,
    ghost_types: Option<Vec<String>>,
    default_restrictions_per_round: Option<u32>,
    unlimited_weight: Option<u32>,
}

impl GameConfig {
    /// Parse a JSON override. Effect deltas must be integers; a value such as
    /// `-12.5` is rejected as a config error.
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let file: GameConfigFile = serde_json::from_str(json)
            .map_err(|e| AppError::config(format!("invalid game config: {e}")))?;
        let defaults = Self::default();

        let default_restrictions_per_round = file
            .default_restrictions_per_round
            .unwrap_or(defaults.default_restrictions_per_round);
        if default_restrictions_per_round == 0 {
            return Err(AppError::config(
                "defaultRestrictionsPerRound must be at least 1",
            ));
        }

        Ok(Self {
            catalog: match file.restrictions {
                Some(templates) => Arc::new(StaticCatalog::new(templates)),
                None => defaults.catalog,
            },
            items: file.items.unwrap_or(defaults.items),
            ghost_types: file.ghost_types.unwrap_or(defaults.ghost_types),
            default_restrictions_per_round,
            unlimited_weight: file.unlimited_weight.unwrap_or(defaults.unlimited_weight),
        })
    }

    pub fn with_catalog(mut self, catalog: Arc<dyn RestrictionCatalog>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn sampler(&self) -> Sampler {
        Sampler::new(self.unlimited_weight)
    }

    pub fn is_known_ghost(&self, tag: &str) -> bool {
        self.ghost_types.iter().any(|g| g == tag)
    }
}
