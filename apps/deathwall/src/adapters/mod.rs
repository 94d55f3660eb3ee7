//! SeaORM adapters. Functions return `DbErr`; the repos layer maps to `DomainError`.

pub mod members_sea;
pub mod restrictions_sea;
pub mod rounds_sea;
pub mod sessions_sea;
