mod resolver;
mod roster;
mod tracker;


pub use resolver::{names_match, normalize_name, resolve_from_pending, resolve_not_checked_in};
pub use roster::{FamilyMember, FamilyRoster};
pub use tracker::{FamilyCheckInState, FamilyCheckInTracker, StatusFailurePolicy};
