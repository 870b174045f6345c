use gymdock_domain::gateway::AdminOverview;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodayCheckInDto {
    pub checkin_id: String,
    pub member_code: Option<String>,
    /// `None` when the backend no longer knows the member
    pub name: Option<String>,
    pub local_time: String, // HH:MM:SS, gym-local
}

/// One poll of the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodaySnapshotDto {
    pub overview: AdminOverview,
    pub check_ins: Vec<TodayCheckInDto>,
    pub fetched_at: String,
}
