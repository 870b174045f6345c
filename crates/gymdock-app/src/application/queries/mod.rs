mod admin_queries;
mod family_queries;
mod member_stats_queries;
mod trend_queries;

pub use admin_queries::AdminQueries;
pub use family_queries::FamilyQueries;
pub use member_stats_queries::MemberStatsQueries;
pub use trend_queries::TrendQueries;
