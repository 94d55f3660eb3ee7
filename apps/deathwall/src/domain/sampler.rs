//! Weighted, capped restriction sampling.
//!
//! A template's weight is the number of draws it has left in the session, so
//! templates close to their cap become rarer before they disappear. Selection
//! is pure: the caller supplies the session's usage history and a random
//! source, and persists whatever comes back.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;
use tracing::debug;

use super::catalog::{OccurrenceCap, RestrictionCatalog};
use crate::errors::domain::{DomainError, ExhaustionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SamplerError {
    #[error("No restrictions found !")]
    NoRestrictionsAvailable,
    #[error("No new restrictions can be added !")]
    PoolExhausted,
}

impl From<SamplerError> for DomainError {
    fn from(err: SamplerError) -> Self {
        let kind = match err {
            SamplerError::NoRestrictionsAvailable => ExhaustionKind::NoRestrictionsAvailable,
            SamplerError::PoolExhausted => ExhaustionKind::PoolExhausted,
        };
        DomainError::exhausted(kind, err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolEntry {
    pub id: String,
    pub weight: u32,
}

/// Count how many times each template appears in a session's history.
pub fn usage_counts<'a, I>(template_ids: I) -> HashMap<String, u32>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = HashMap::new();
    for id in template_ids {
        *counts.entry(id.to_string()).or_insert(0) += 1;
    }
    counts
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sampler {
    /// Starting weight of an unlimited template. It decays by one per use
    /// but is floored at 1, so unlimited templates never leave the pool.
    pub unlimited_weight: u32,
}

impl Default for Sampler {
    fn default() -> Self {
        Self {
            unlimited_weight: 1,
        }
    }
}

impl Sampler {
    pub fn new(unlimited_weight: u32) -> Self {
        Self { unlimited_weight }
    }

    pub fn weight(&self, cap: OccurrenceCap, used: u32) -> u32 {
        match cap {
            OccurrenceCap::Limited(cap) => cap.saturating_sub(used),
            OccurrenceCap::Unlimited => self.unlimited_weight.saturating_sub(used).max(1),
        }
    }

    /// Weighted pool of templates that still have allowance, in catalog order.
    pub fn build_pool(
        &self,
        catalog: &dyn RestrictionCatalog,
        usage: &HashMap<String, u32>,
    ) -> Result<Vec<PoolEntry>, SamplerError> {
        let templates = catalog.list_templates();
        if templates.is_empty() {
            return Err(SamplerError::NoRestrictionsAvailable);
        }

        let pool: Vec<PoolEntry> = templates
            .iter()
            .map(|t| PoolEntry {
                id: t.id.clone(),
                weight: self.weight(t.occurrence_cap, usage.get(&t.id).copied().unwrap_or(0)),
            })
            .filter(|entry| entry.weight > 0)
            .collect();

        if pool.is_empty() {
            return Err(SamplerError::PoolExhausted);
        }
        Ok(pool)
    }

    /// Pick up to `desired` distinct template ids for a new round.
    pub fn select<R: Rng + ?Sized>(
        &self,
        catalog: &dyn RestrictionCatalog,
        usage: &HashMap<String, u32>,
        desired: usize,
        rng: &mut R,
    ) -> Result<Vec<String>, SamplerError> {
        let mut pool = self.build_pool(catalog, usage)?;
        pool.shuffle(rng);
        let selected = draw(&pool, desired, rng);
        debug!(
            pool_size = pool.len(),
            desired,
            selected = selected.len(),
            "Restrictions drawn"
        );
        Ok(selected)
    }
}

/// Roulette-wheel draw without replacement.
///
/// Each draw rolls in `[0, total_weight)` and walks the pool until the
/// remainder drops to zero or below. An entry already chosen this batch is
/// skipped and the walk continues with the same remainder; a walk that runs
/// off the end yields nothing for that draw. Weights are not renormalised
/// after a pick, so the result may hold fewer than `desired` ids.
///
/// The walk stops early once every entry has been taken.
pub fn draw<R: Rng + ?Sized>(pool: &[PoolEntry], desired: usize, rng: &mut R) -> Vec<String> {
    let total_weight: u64 = pool.iter().map(|e| u64::from(e.weight)).sum();
    let mut selected: Vec<String> = Vec::with_capacity(desired.min(pool.len()));

    for _ in 0..desired {
        if selected.len() == pool.len() {
            break;
        }
        let mut roll = rng.random::<f64>() * total_weight as f64;

        for entry in pool {
            roll -= f64::from(entry.weight);
            if roll <= 0.0 && !selected.contains(&entry.id) {
                selected.push(entry.id.clone());
                break;
            }
        }
    }

    selected
}
