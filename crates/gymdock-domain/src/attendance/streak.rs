use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::clock::ZoneCalendar;

/// Current and best run of consecutive local days with a check-in.
///
/// Invariant: `current <= highest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreakStats {
    current: u32,
    highest: u32,
}

impl StreakStats {
    /// Accept a streak pair from an untrusted source.
    ///
    /// A current run longer than the best run is impossible, so `highest` is
    /// raised to `current` and the contradiction is logged.
    pub fn reconciled(current: u32, highest: u32) -> Self {
        if current > highest {
            warn!(
                "[stats] current streak exceeds highest streak current={} highest={}, clamping",
                current, highest
            );
            return Self {
                current,
                highest: current,
            };
        }
        Self { current, highest }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn highest(&self) -> u32 {
        self.highest
    }
}

/// Full result of a streak walk over a member's history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakComputation {
    pub current_streak: u32,
    pub highest_streak: u32,
    pub total_check_in_days: u32,
    pub last_check_in_date: Option<NaiveDate>,
}

impl StreakComputation {
    pub fn stats(&self) -> StreakStats {
        StreakStats::reconciled(self.current_streak, self.highest_streak)
    }
}

/// Compute streaks from raw check-in instants.
///
/// Days are local to `calendar`; several check-ins on one day count once and
/// check-ins after `today` are ignored. The current streak is the run ending
/// on the latest check-in day, and it is still alive only if that day is
/// today or yesterday (today's visit may simply not have happened yet).
pub fn compute_streaks<I>(
    timestamps: I,
    today: NaiveDate,
    calendar: &ZoneCalendar,
) -> StreakComputation
where
    I: IntoIterator<Item = DateTime<Utc>>,
{
    let days: BTreeSet<NaiveDate> = timestamps
        .into_iter()
        .map(|instant| calendar.local_date(instant))
        .filter(|date| *date <= today)
        .collect();

    let mut run = 0u32;
    let mut highest_streak = 0u32;
    let mut last_check_in_date: Option<NaiveDate> = None;

    for date in &days {
        run = match last_check_in_date {
            Some(prev) if (*date - prev).num_days() == 1 => run + 1,
            _ => 1,
        };
        highest_streak = highest_streak.max(run);
        last_check_in_date = Some(*date);
    }

    let current_streak = match last_check_in_date {
        Some(last) if (today - last).num_days() <= 1 => run,
        _ => 0,
    };

    StreakComputation {
        current_streak,
        highest_streak,
        total_check_in_days: days.len() as u32,
        last_check_in_date,
    }
}
