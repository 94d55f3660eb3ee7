//! Deathwall test support utilities
//!
//! Unified logging initialization and unique test identifiers shared by unit
//! and integration tests.

pub mod logging;

use ulid::Ulid;

/// Generate a unique string with the given prefix
///
/// # Examples
/// ```
/// use deathwall_test_support::unique_str;
///
/// let id1 = unique_str("user");
/// let id2 = unique_str("user");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("user-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// A unique guild identifier, so tests sharing a database never collide on
/// the one-session-per-guild rule.
pub fn unique_guild() -> String {
    unique_str("guild")
}
