//! Property tests for restriction sampling and scoring (pure domain, no DB).
//!
//! - Repeated rounds never push a capped template past its cap
//! - A single draw never repeats a template
//! - Scores are never negative and reaching the goal never scores less than
//!   falling short with the same history

use std::collections::HashMap;

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::catalog::{OccurrenceCap, RestrictionCatalog, RestrictionTemplate, StaticCatalog};
use crate::domain::sampler::{usage_counts, Sampler, SamplerError};
use crate::domain::scoring::compute_final_score;

fn catalog_strategy() -> impl Strategy<Value = StaticCatalog> {
    prop::collection::vec(prop::option::of(1u32..=4), 1..12).prop_map(|caps| {
        StaticCatalog::new(
            caps.into_iter()
                .enumerate()
                .map(|(i, cap)| RestrictionTemplate::new(format!("r{i}"), cap.into(), 1))
                .collect(),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: caps hold across a whole session of rounds
    #[test]
    fn prop_caps_never_exceeded(
        catalog in catalog_strategy(),
        per_round in 1usize..=4,
        rounds in 1usize..=30,
        seed in any::<u64>(),
    ) {
        let sampler = Sampler::new(3);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut history: Vec<String> = Vec::new();

        for _ in 0..rounds {
            let usage = usage_counts(history.iter().map(String::as_str));
            match sampler.select(&catalog, &usage, per_round, &mut rng) {
                Ok(picked) => {
                    prop_assert!(picked.len() <= per_round);
                    history.extend(picked);
                }
                Err(SamplerError::PoolExhausted) => break,
                Err(other) => prop_assert!(false, "unexpected {other:?}"),
            }
        }

        let usage = usage_counts(history.iter().map(String::as_str));
        for template in catalog.list_templates() {
            if let OccurrenceCap::Limited(cap) = template.occurrence_cap {
                let used = usage.get(&template.id).copied().unwrap_or(0);
                prop_assert!(used <= cap, "{} used {used} > cap {cap}", template.id);
            }
        }
    }

    /// Property: no duplicates within one draw
    #[test]
    fn prop_single_draw_is_distinct(
        catalog in catalog_strategy(),
        per_round in 1usize..=8,
        seed in any::<u64>(),
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let picked = Sampler::default()
            .select(&catalog, &HashMap::new(), per_round, &mut rng)
            .unwrap();
        let mut sorted = picked.clone();
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(sorted.len(), picked.len());
    }

    /// Property: score bounds
    #[test]
    fn prop_score_non_negative_and_goal_bonus_monotone(
        goal in 1u32..=10,
        wins in 0u32..=10,
        extra_losses in 0u32..=1,
        restriction_score in 0i64..=200,
    ) {
        let played = wins + extra_losses;
        let s = compute_final_score(goal, wins, played, restriction_score);
        prop_assert!(s.score >= 0);
        prop_assert_eq!(s.goal_reached, wins >= goal);

        if wins > 0 {
            let unreachable = compute_final_score(wins + 1, wins, played, restriction_score);
            let reached = compute_final_score(wins, wins, played, restriction_score);
            prop_assert!(reached.score >= unreachable.score);
        }
    }
}
