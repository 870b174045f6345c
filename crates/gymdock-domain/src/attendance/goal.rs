use serde::{Deserialize, Serialize};

/// Target number of check-ins per week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct WeeklyGoal(u32);

impl WeeklyGoal {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 7;
    pub const DEFAULT: u32 = 3;

    /// Out-of-range values are clamped into `MIN..=MAX`.
    pub fn new(value: u32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn increment(self) -> Self {
        Self::new(self.0.saturating_add(1))
    }

    pub fn decrement(self) -> Self {
        Self::new(self.0.saturating_sub(1))
    }

    /// Rounded share of the goal reached; may exceed 100.
    pub fn progress_percent(&self, weekly_count: u32) -> u32 {
        ((f64::from(weekly_count) / f64::from(self.0)) * 100.0).round() as u32
    }

    /// Width of a progress bar, capped at 100.
    pub fn bar_fill_percent(&self, weekly_count: u32) -> u32 {
        self.progress_percent(weekly_count).min(100)
    }

    pub fn is_met(&self, weekly_count: u32) -> bool {
        weekly_count >= self.0
    }
}

impl Default for WeeklyGoal {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl From<u32> for WeeklyGoal {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<WeeklyGoal> for u32 {
    fn from(goal: WeeklyGoal) -> Self {
        goal.0
    }
}
