// Backend contract
// Implemented over HTTP in the infrastructure layer and by in-memory fakes in tests

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::attendance::MemberStatsSnapshot;
use crate::family::FamilyRoster;
use crate::member::{CheckInReceipt, MemberProfile, MemberProfileUpdate, NewMember};
use crate::shared::{CheckInId, DomainError, MemberId};
use crate::trend::{Granularity, TrendEvent};

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminOverview {
    pub total_members: u64,
    pub checkins_today: u64,
    pub total_checkins: u64,
}

/// One row of the live "today" list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodayCheckIn {
    pub checkin_id: CheckInId,
    pub member_code: Option<String>,
    pub name: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[async_trait]
pub trait MemberDirectory: Send + Sync {
    /// `Ok(None)` when the backend does not know the id.
    async fn find_member(&self, id: &MemberId) -> Result<Option<MemberProfile>, DomainError>;
    async fn register_member(&self, member: &NewMember) -> Result<MemberProfile, DomainError>;
    async fn update_member(
        &self,
        id: &MemberId,
        update: &MemberProfileUpdate,
    ) -> Result<(), DomainError>;
    /// `member_key` is whatever the backend resolves a member by: the stored
    /// id, or the tag code right after registration.
    async fn check_in(&self, member_key: &str) -> Result<CheckInReceipt, DomainError>;
    async fn member_stats(&self, id: &MemberId) -> Result<MemberStatsSnapshot, DomainError>;
}

#[async_trait]
pub trait FamilyDirectory: Send + Sync {
    async fn roster(&self, email: &str) -> Result<FamilyRoster, DomainError>;
    /// Names the backend reports as not yet checked in today.
    async fn pending_check_ins(&self, email: &str) -> Result<Vec<String>, DomainError>;
    /// Returns the backend's confirmation message.
    async fn check_in_family(
        &self,
        email: &str,
        member_names: &[String],
    ) -> Result<String, DomainError>;
}

#[async_trait]
pub trait AttendanceReports: Send + Sync {
    async fn check_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        granularity: Granularity,
    ) -> Result<Vec<TrendEvent>, DomainError>;
    async fn overview(&self) -> Result<AdminOverview, DomainError>;
    async fn todays_check_ins(&self) -> Result<Vec<TodayCheckIn>, DomainError>;
}
