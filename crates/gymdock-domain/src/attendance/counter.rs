use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::types::MemberAttendanceRecord;
use crate::clock::{monday_of, ZoneCalendar};

/// Check-in counts for the current month and week.
///
/// Counts are events, not distinct days: two scans on one day count twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PeriodCounts {
    pub monthly_count: u32,
    pub weekly_count: u32,
}

/// Count a member's check-ins in the current local month and in the current
/// week (Monday through today, inclusive).
pub fn count_periods(
    record: &MemberAttendanceRecord,
    now: DateTime<Utc>,
    calendar: &ZoneCalendar,
) -> PeriodCounts {
    let today = calendar.local_date(now);
    let monday = monday_of(today);

    record
        .timestamps()
        .map(|instant| calendar.local_date(instant))
        .fold(PeriodCounts::default(), |mut counts, date| {
            if date.year() == today.year() && date.month() == today.month() {
                counts.monthly_count += 1;
            }
            if date >= monday && date <= today {
                counts.weekly_count += 1;
            }
            counts
        })
}
