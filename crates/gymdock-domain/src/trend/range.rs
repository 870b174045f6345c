use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::shared::DomainError;

/// Inclusive range of local calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DomainError> {
        if start > end {
            return Err(DomainError::Validation(format!(
                "Range start {} is after end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// The last `days` days ending on `today`, inclusive.
    pub fn last_n_days(today: NaiveDate, days: u32) -> Result<Self, DomainError> {
        if days == 0 || days > 366 {
            return Err(DomainError::Validation(
                "Days must be between 1 and 366".to_string(),
            ));
        }
        Self::new(today - Duration::days(i64::from(days) - 1), today)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn day_count(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}
