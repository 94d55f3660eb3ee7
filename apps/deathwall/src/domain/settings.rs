//! Cumulative game settings derived from a session's restriction history.

use serde::Serialize;

use super::catalog::{EffectMetadata, EffectValue};
use super::placeholders::is_item_removal_key;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Modifiers {
    pub evidence: i64,
    pub tier: i64,
    pub entity_speed: i64,
    pub player_speed: i64,
    pub breaker: bool,
    pub sanity: i64,
    pub sprint: bool,
}

impl Modifiers {
    fn numeric_mut(&mut self, key: &str) -> Option<&mut i64> {
        match key {
            "evidence" => Some(&mut self.evidence),
            "tier" => Some(&mut self.tier),
            "entitySpeed" => Some(&mut self.entity_speed),
            "playerSpeed" => Some(&mut self.player_speed),
            "sanity" => Some(&mut self.sanity),
            _ => None,
        }
    }

    fn flag_mut(&mut self, key: &str) -> Option<&mut bool> {
        match key {
            "breaker" => Some(&mut self.breaker),
            "sprint" => Some(&mut self.sprint),
            _ => None,
        }
    }

    fn is_modifier(key: &str) -> bool {
        matches!(
            key,
            "evidence" | "tier" | "entitySpeed" | "playerSpeed" | "breaker" | "sanity" | "sprint"
        )
    }
}

/// Snapshot of the modifiers in force for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSettings {
    pub modifiers: Modifiers,
    pub removed_items: Vec<String>,
}

impl GameSettings {
    pub fn baseline() -> Self {
        Self {
            modifiers: Modifiers {
                evidence: 3,
                tier: 3,
                entity_speed: 100,
                player_speed: 100,
                breaker: true,
                sanity: 100,
                sprint: true,
            },
            removed_items: Vec::new(),
        }
    }

    /// Fold one instance's metadata into the snapshot.
    ///
    /// Deltas add onto numeric modifiers, flags overwrite boolean modifiers,
    /// and item tags under removal keys are collected. Anything else,
    /// including a value whose type does not match its modifier, is ignored.
    pub fn apply(&mut self, effects: &EffectMetadata) {
        for (key, value) in effects {
            if Modifiers::is_modifier(key) {
                match value {
                    EffectValue::Delta(delta) => {
                        if let Some(slot) = self.modifiers.numeric_mut(key) {
                            *slot += delta;
                        }
                    }
                    EffectValue::Flag(flag) => {
                        if let Some(slot) = self.modifiers.flag_mut(key) {
                            *slot = *flag;
                        }
                    }
                    EffectValue::Tag(_) => {}
                }
            } else if let EffectValue::Tag(item) = value {
                if is_item_removal_key(key) {
                    self.removed_items.push(item.clone());
                }
            }
        }
    }

    pub fn aggregate<'a, I>(history: I) -> Self
    where
        I: IntoIterator<Item = &'a EffectMetadata>,
    {
        history.into_iter().fold(Self::baseline(), |mut acc, effects| {
            acc.apply(effects);
            acc
        })
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self::baseline()
    }
}
