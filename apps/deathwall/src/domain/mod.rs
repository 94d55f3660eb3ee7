//! Domain layer: pure session logic, no database access.

pub mod catalog;
pub mod lifecycle;
pub mod placeholders;
pub mod rng;
pub mod sampler;
pub mod scoring;
pub mod settings;

#[cfg(test)]
mod tests_props_sampler;

// Re-exports for ergonomics
pub use catalog::{
    EffectMetadata, EffectValue, ItemPool, OccurrenceCap, RestrictionCatalog, RestrictionTemplate,
    StaticCatalog,
};
pub use lifecycle::{evaluate_termination, RoundState, SessionPhase, StreakTally, Termination};
pub use rng::SharedRng;
pub use sampler::{Sampler, SamplerError};
pub use scoring::{compute_final_score, ScoreBreakdown};
pub use settings::{GameSettings, Modifiers};
