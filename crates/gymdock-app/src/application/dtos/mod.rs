mod admin_dto;
mod family_dto;
mod member_dto;
mod trend_dto;

pub use admin_dto::{TodayCheckInDto, TodaySnapshotDto};
pub use family_dto::{FamilyCheckInOutcomeDto, FamilyMemberDto, FamilyRosterDto, FamilyStatusDto};
pub use member_dto::{CheckInReceiptDto, MemberProfileDto, MemberStatsDto};
pub use trend_dto::TrendDto;
