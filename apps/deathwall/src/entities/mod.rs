pub mod session_members;
pub mod session_restrictions;
pub mod session_rounds;
pub mod sessions;

pub use session_members::Entity as SessionMembers;
pub use session_members::Model as SessionMember;
pub use session_restrictions::Entity as SessionRestrictions;
pub use session_restrictions::Model as SessionRestriction;
pub use session_rounds::Entity as SessionRounds;
pub use session_rounds::Model as SessionRound;
pub use sessions::Entity as Sessions;
pub use sessions::Model as Session;
