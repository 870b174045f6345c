use gymdock_domain::member::{CheckInReceipt, MemberProfile};
use gymdock_domain::ZoneCalendar;
use serde::{Deserialize, Serialize};

/// Everything the member stats page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberStatsDto {
    pub member_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub barcode: Option<String>,
    pub member_since: Option<String>, // YYYY-MM-DD, gym-local
    pub monthly_check_ins: u32,
    pub weekly_check_ins: u32,
    pub current_streak: u32,
    pub highest_streak: u32,
    pub weekly_goal: u32,
    pub goal_percent: u32,
    pub bar_fill_percent: u32,
    pub goal_met: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfileDto {
    pub id: String,
    pub member_code: String,
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInReceiptDto {
    pub checkin_id: String,
    pub member_id: String,
    pub local_time: String, // YYYY-MM-DD HH:MM:SS, gym-local
    pub message: String,
}

impl From<MemberProfile> for MemberProfileDto {
    fn from(profile: MemberProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            member_code: profile.member_code,
            name: profile.name,
            active: profile.active,
        }
    }
}

impl CheckInReceiptDto {
    pub fn from_receipt(
        receipt: &CheckInReceipt,
        calendar: &ZoneCalendar,
        message: impl Into<String>,
    ) -> Self {
        Self {
            checkin_id: receipt.id.to_string(),
            member_id: receipt.member_id.to_string(),
            local_time: calendar
                .to_local(receipt.timestamp)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            message: message.into(),
        }
    }
}
