//! Repository functions for the domain layer. Adapters return `DbErr`; these
//! return `DomainError` and domain models.

pub mod members;
pub mod restrictions;
pub mod rounds;
pub mod sessions;

pub use members::SessionMember;
pub use restrictions::{NewRestriction, RestrictionInstance};
pub use rounds::SessionRound;
pub use sessions::Session;
