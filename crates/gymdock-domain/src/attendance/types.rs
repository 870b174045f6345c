use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::clock::parse_instant;
use crate::shared::MemberId;

/// One attendance scan. Owned by the backend, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CheckInEvent {
    pub timestamp: DateTime<Utc>,
}

impl CheckInEvent {
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self { timestamp }
    }
}

/// A member's historical check-ins, assembled fresh for every profile view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberAttendanceRecord {
    member_id: MemberId,
    check_ins: Vec<CheckInEvent>,
}

impl MemberAttendanceRecord {
    pub fn new(member_id: MemberId, check_ins: Vec<CheckInEvent>) -> Self {
        Self {
            member_id,
            check_ins,
        }
    }

    /// Build a record from raw timestamps.
    ///
    /// An absent list yields an empty record and malformed entries are
    /// skipped, so a bad stats field never blocks a profile from rendering.
    pub fn from_raw(member_id: MemberId, raw: Option<&[String]>) -> Self {
        let Some(raw) = raw else {
            return Self::new(member_id, Vec::new());
        };

        let mut check_ins = Vec::with_capacity(raw.len());
        for value in raw {
            match parse_instant(value) {
                Some(timestamp) => check_ins.push(CheckInEvent::new(timestamp)),
                None => warn!(
                    "[stats] skip malformed check-in timestamp member_id={} value={}",
                    member_id, value
                ),
            }
        }

        Self::new(member_id, check_ins)
    }

    pub fn member_id(&self) -> &MemberId {
        &self.member_id
    }

    pub fn check_ins(&self) -> &[CheckInEvent] {
        &self.check_ins
    }

    pub fn timestamps(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.check_ins.iter().map(|event| event.timestamp)
    }

    pub fn is_empty(&self) -> bool {
        self.check_ins.is_empty()
    }
}

/// Per-member stats as reported by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberStatsSnapshot {
    pub name: Option<String>,
    pub email: Option<String>,
    pub member_since: Option<DateTime<Utc>>,
    pub barcode: Option<String>,
    /// Monthly count as computed server-side
    pub reported_monthly: Option<u32>,
    pub reported_current_streak: Option<u32>,
    pub reported_highest_streak: Option<u32>,
    pub record: MemberAttendanceRecord,
}
