//! Wire payloads exchanged with the gym backend.
//!
//! Every optional field is declared up front and defaults when absent;
//! unknown fields are ignored. Conversion into domain types happens here so
//! endpoint code never touches raw JSON.

use gymdock_domain::attendance::{MemberAttendanceRecord, MemberStatsSnapshot};
use gymdock_domain::clock::parse_instant;
use gymdock_domain::family::FamilyMember;
use gymdock_domain::gateway::{AdminOverview, TodayCheckIn};
use gymdock_domain::member::{CheckInReceipt, MemberProfile};
use gymdock_domain::shared::CheckInId;
use gymdock_domain::trend::{EventDate, TrendEvent};
use gymdock_domain::{DomainError, MemberId};
use log::warn;
use serde::{Deserialize, Serialize};

pub const USER_AGENT: &str = concat!("gymdock-kiosk/", env!("CARGO_PKG_VERSION"));

/// HTTP retry configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (default: 3)
    pub max_retries: u32,
    /// Initial backoff duration in milliseconds (default: 500ms)
    pub initial_backoff_ms: u64,
    /// Maximum backoff duration in milliseconds (default: 5000ms)
    pub max_backoff_ms: u64,
    /// Backoff multiplier (default: 2.0 for exponential backoff)
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff_ms: 500,
            max_backoff_ms: 5000,
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Delay before retry number `attempt` (1-based).
    pub fn backoff_for(&self, attempt: u32) -> u64 {
        let mut backoff = self.initial_backoff_ms;
        for _ in 1..attempt {
            backoff = ((backoff as f64 * self.backoff_multiplier) as u64).min(self.max_backoff_ms);
        }
        backoff.min(self.max_backoff_ms)
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemberPayload {
    pub id: String,
    /// Tag code; the backend calls it `member_id`
    pub member_id: String,
    pub name: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl From<MemberPayload> for MemberProfile {
    fn from(payload: MemberPayload) -> Self {
        MemberProfile {
            id: MemberId::from_string(&payload.id),
            member_code: payload.member_id,
            name: payload.name,
            active: payload.active,
            created_at: payload.created_at.as_deref().and_then(parse_instant),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewMemberRequest<'a> {
    pub member_id: &'a str,
    pub name: &'a str,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberUpdateRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckInRequest<'a> {
    pub member_id: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckInPayload {
    pub id: String,
    pub member_id: String,
    pub timestamp: String,
}

impl TryFrom<CheckInPayload> for CheckInReceipt {
    type Error = DomainError;

    fn try_from(payload: CheckInPayload) -> Result<Self, Self::Error> {
        let timestamp = parse_instant(&payload.timestamp).ok_or_else(|| {
            DomainError::Deserialization(format!(
                "Invalid check-in timestamp: {}",
                payload.timestamp
            ))
        })?;
        Ok(CheckInReceipt {
            id: CheckInId::from_string(&payload.id),
            member_id: MemberId::from_string(&payload.member_id),
            timestamp,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MemberStatsPayload {
    pub monthly_check_ins: Option<u32>,
    pub current_streak: Option<u32>,
    pub highest_streak: Option<u32>,
    pub member_since: Option<String>,
    pub check_in_dates: Option<Vec<String>>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub barcode: Option<String>,
}

impl MemberStatsPayload {
    pub fn into_snapshot(self, member_id: &MemberId) -> MemberStatsSnapshot {
        MemberStatsSnapshot {
            name: self.name,
            email: self.email,
            member_since: self.member_since.as_deref().and_then(parse_instant),
            barcode: self.barcode,
            reported_monthly: self.monthly_check_ins,
            reported_current_streak: self.current_streak,
            reported_highest_streak: self.highest_streak,
            record: MemberAttendanceRecord::from_raw(
                member_id.clone(),
                self.check_in_dates.as_deref(),
            ),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FamilyMemberPayload {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

impl FamilyMemberPayload {
    pub fn into_member(self, family_email: &str) -> FamilyMember {
        FamilyMember {
            id: MemberId::from_string(&self.id),
            name: self.name,
            email: self
                .email
                .filter(|email| !email.trim().is_empty())
                .unwrap_or_else(|| family_email.to_string()),
            is_deleted: self.is_deleted,
            deleted_at: self.deleted_at.as_deref().and_then(parse_instant),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CheckInStatusPayload {
    pub not_checked_in: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FamilyCheckInRequest<'a> {
    pub email: &'a str,
    pub member_names: &'a [String],
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MessagePayload {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RangeRowPayload {
    pub date: String,
    #[serde(default)]
    pub count: u64,
}

/// Convert range rows, skipping any whose date cannot be read.
pub fn into_trend_events(rows: Vec<RangeRowPayload>) -> Vec<TrendEvent> {
    rows.into_iter()
        .filter_map(|row| match EventDate::parse(&row.date) {
            Some(date) => Some(TrendEvent {
                date,
                count: row.count,
            }),
            None => {
                warn!("[trend] skip malformed range row date={}", row.date);
                None
            }
        })
        .collect()
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OverviewPayload {
    pub total_members: u64,
    pub checkins_today: u64,
    pub total_checkins: u64,
}

impl From<OverviewPayload> for AdminOverview {
    fn from(payload: OverviewPayload) -> Self {
        AdminOverview {
            total_members: payload.total_members,
            checkins_today: payload.checkins_today,
            total_checkins: payload.total_checkins,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TodayRowPayload {
    pub checkin_id: String,
    #[serde(default)]
    pub member_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub timestamp: String,
}

/// Convert today's rows, skipping any with an unreadable timestamp.
pub fn into_today_check_ins(rows: Vec<TodayRowPayload>) -> Vec<TodayCheckIn> {
    rows.into_iter()
        .filter_map(|row| match parse_instant(&row.timestamp) {
            Some(timestamp) => Some(TodayCheckIn {
                checkin_id: CheckInId::from_string(&row.checkin_id),
                member_code: row.member_id,
                name: row.name,
                timestamp,
            }),
            None => {
                warn!(
                    "[poll] skip check-in with malformed timestamp checkin_id={} value={}",
                    row.checkin_id, row.timestamp
                );
                None
            }
        })
        .collect()
}
