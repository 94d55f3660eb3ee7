//! Transactional orchestration over repos and pure domain logic.

pub mod coordinator;
pub mod history;
pub mod rounds;
pub mod scores;
pub mod sessions;

pub use coordinator::SessionCoordinator;
pub use rounds::{RoundResult, RoundService, RoundStart};
pub use scores::ScoreService;
pub use sessions::{SessionOutcome, SessionOverview, SessionService};
