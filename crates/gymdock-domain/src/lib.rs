// Domain layer - attendance aggregation and calendar bucketing
// No dependencies on infrastructure or presentation layers

pub mod attendance;
pub mod clock;
pub mod family;
pub mod gateway;
pub mod member;
pub mod session;
pub mod shared;
pub mod trend;

// Re-exports for convenience
pub use clock::{Clock, FixedClock, SystemClock, ZoneCalendar};
pub use shared::{DomainError, MemberId};
