//! Restriction templates, the read-only catalog that serves them, and the
//! item pool used to fill "random item" placeholders.

use std::collections::BTreeMap;
use std::fmt::Debug;

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How many times a template may be drawn within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<u32>", into = "Option<u32>")]
pub enum OccurrenceCap {
    Limited(u32),
    #[default]
    Unlimited,
}

impl From<Option<u32>> for OccurrenceCap {
    fn from(value: Option<u32>) -> Self {
        value.map_or(OccurrenceCap::Unlimited, OccurrenceCap::Limited)
    }
}

impl From<OccurrenceCap> for Option<u32> {
    fn from(value: OccurrenceCap) -> Self {
        match value {
            OccurrenceCap::Limited(cap) => Some(cap),
            OccurrenceCap::Unlimited => None,
        }
    }
}

/// A single effect value: numeric delta, boolean override or string tag.
/// Deltas are whole numbers; a fractional number matches no variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EffectValue {
    Flag(bool),
    Delta(i64),
    Tag(String),
}

/// Effect key → value. Ordered so persisted JSON and aggregation are stable.
pub type EffectMetadata = BTreeMap<String, EffectValue>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestrictionTemplate {
    pub id: String,
    #[serde(rename = "occurrences", default)]
    pub occurrence_cap: OccurrenceCap,
    pub score: i64,
    #[serde(default)]
    pub effects: EffectMetadata,
}

impl RestrictionTemplate {
    pub fn new(id: impl Into<String>, occurrence_cap: OccurrenceCap, score: i64) -> Self {
        Self {
            id: id.into(),
            occurrence_cap,
            score,
            effects: EffectMetadata::new(),
        }
    }

    pub fn with_effect(mut self, key: impl Into<String>, value: EffectValue) -> Self {
        self.effects.insert(key.into(), value);
        self
    }
}

/// Read-only access to restriction templates.
pub trait RestrictionCatalog: Debug + Send + Sync {
    fn list_templates(&self) -> &[RestrictionTemplate];

    fn find(&self, id: &str) -> Option<&RestrictionTemplate> {
        self.list_templates().iter().find(|t| t.id == id)
    }
}

/// In-memory catalog, either the built-in set or one loaded from JSON.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    templates: Vec<RestrictionTemplate>,
}

impl StaticCatalog {
    pub fn new(templates: Vec<RestrictionTemplate>) -> Self {
        Self { templates }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let templates: Vec<RestrictionTemplate> = serde_json::from_str(json)?;
        Ok(Self::new(templates))
    }

    /// The sixteen restrictions shipped with the game.
    pub fn builtin() -> Self {
        use EffectValue::{Delta, Flag, Tag};
        use OccurrenceCap::Limited;

        Self::new(vec![
            RestrictionTemplate::new("no_flashlights", Limited(1), 3)
                .with_effect("item", Tag("flashlight".into())),
            RestrictionTemplate::new("broken_sprint", Limited(1), 3)
                .with_effect("sprint", Flag(false)),
            RestrictionTemplate::new("radio_silence", Limited(1), 2)
                .with_effect("item", Tag("spirit_box".into())),
            RestrictionTemplate::new("candlelight_only", Limited(1), 3)
                .with_effect("breaker", Flag(false)),
            RestrictionTemplate::new("single_trip", Limited(2), 2),
            RestrictionTemplate::new("forgotten_item", Limited(4), 1)
                .with_effect("forgottenItem", Delta(1)),
            RestrictionTemplate::new("shy_ghost", Limited(3), 2).with_effect("evidence", Delta(-1)),
            RestrictionTemplate::new("athletic_ghost", Limited(3), 2)
                .with_effect("entitySpeed", Delta(25)),
            RestrictionTemplate::new("untrained_hunters", Limited(2), 2)
                .with_effect("sanity", Delta(-25)),
            RestrictionTemplate::new("blackout", Limited(1), 3).with_effect("breaker", Flag(false)),
            RestrictionTemplate::new("lower_tier_items", Limited(2), 2)
                .with_effect("tier", Delta(-1)),
            RestrictionTemplate::new("random_map", Limited(1), 1),
            RestrictionTemplate::new("insane_hunters", Limited(2), 2)
                .with_effect("sanity", Delta(-25)),
            RestrictionTemplate::new("dodgy_medicine", Limited(1), 2)
                .with_effect("item", Tag("sanity_medication".into())),
            RestrictionTemplate::new("sole_copy", Limited(3), 1).with_effect("soleItem", Delta(1)),
            RestrictionTemplate::new("suspicious_contractors", Limited(1), 2)
                .with_effect("playerSpeed", Delta(-25)),
        ])
    }
}

impl RestrictionCatalog for StaticCatalog {
    fn list_templates(&self) -> &[RestrictionTemplate] {
        &self.templates
    }
}

/// Fixed list of concrete items a placeholder can resolve to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemPool {
    items: Vec<String>,
}

impl ItemPool {
    pub fn new(items: Vec<String>) -> Self {
        Self { items }
    }

    pub fn builtin() -> Self {
        Self::new(
            [
                "flashlight",
                "emf_reader",
                "spirit_box",
                "ghost_writing_book",
                "video_camera",
                "dots_projector",
                "uv_light",
                "thermometer",
                "crucifix",
                "salt",
                "incense",
                "sanity_medication",
                "photo_camera",
                "parabolic_microphone",
                "motion_sensor",
                "sound_sensor",
                "firelight",
                "igniter",
                "head_gear",
                "tripod",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        )
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn random_item<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.items.choose(rng).map(String::as_str)
    }
}
