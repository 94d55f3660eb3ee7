//! Resolution of "random item" placeholders in effect metadata.

use rand::Rng;

use super::catalog::{EffectMetadata, EffectValue, ItemPool};

/// Effect keys whose string values name an item taken away from the players.
pub const ITEM_REMOVAL_KEYS: [&str; 3] = ["item", "forgottenItem", "soleItem"];

pub fn is_item_removal_key(key: &str) -> bool {
    ITEM_REMOVAL_KEYS.contains(&key)
}

/// Copy `effects` for a new restriction instance, replacing placeholders.
///
/// An item-removal key holding a non-zero number becomes a concrete item
/// drawn from `items`. A zero placeholder (or one that cannot be filled
/// because the pool is empty) is dropped. Every other entry is copied as is.
pub fn resolve_placeholders<R: Rng + ?Sized>(
    effects: &EffectMetadata,
    items: &ItemPool,
    rng: &mut R,
) -> EffectMetadata {
    let mut resolved = EffectMetadata::new();

    for (key, value) in effects {
        match value {
            EffectValue::Delta(n) if is_item_removal_key(key) => {
                if *n == 0 {
                    continue;
                }
                if let Some(item) = items.random_item(rng) {
                    resolved.insert(key.clone(), EffectValue::Tag(item.to_string()));
                }
            }
            other => {
                resolved.insert(key.clone(), other.clone());
            }
        }
    }

    resolved
}
