mod counter;
mod goal;
mod streak;
mod types;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::ZoneCalendar;

pub use counter::{count_periods, PeriodCounts};
pub use goal::WeeklyGoal;
pub use streak::{compute_streaks, StreakComputation, StreakStats};
pub use types::{CheckInEvent, MemberAttendanceRecord, MemberStatsSnapshot};

/// Everything the member stats view displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    pub counts: PeriodCounts,
    pub streak: StreakStats,
    pub goal: WeeklyGoal,
}

impl AttendanceSummary {
    pub fn goal_percent(&self) -> u32 {
        self.goal.progress_percent(self.counts.weekly_count)
    }
}

/// Derive the stats view from a backend snapshot.
///
/// Counts always come from the raw check-in list. Streaks come from the
/// backend when it reports both values and are recomputed from the list
/// otherwise; either way the pair is reconciled so `current <= highest`.
pub fn summarize(
    snapshot: &MemberStatsSnapshot,
    goal: WeeklyGoal,
    now: DateTime<Utc>,
    calendar: &ZoneCalendar,
) -> AttendanceSummary {
    let counts = count_periods(&snapshot.record, now, calendar);

    let streak = match (
        snapshot.reported_current_streak,
        snapshot.reported_highest_streak,
    ) {
        (Some(current), Some(highest)) => StreakStats::reconciled(current, highest),
        _ => compute_streaks(
            snapshot.record.timestamps(),
            calendar.local_date(now),
            calendar,
        )
        .stats(),
    };

    AttendanceSummary {
        counts,
        streak,
        goal,
    }
}
