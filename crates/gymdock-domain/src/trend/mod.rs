//! Zero-filled day/month series for the admin trend chart.
//!
//! The backend may omit periods without activity and may return day rows
//! even when months were requested. The bucketer always emits one bucket per
//! unit in the requested range and folds rows into the coarser unit.

mod bucketer;
mod range;


use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::{parse_date_key, parse_instant, ZoneCalendar};
use crate::shared::DomainError;

pub use bucketer::bucket_range;
pub use range::DateRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Day,
    Month,
}

impl Granularity {
    pub fn as_query_param(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Month => "month",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query_param())
    }
}

impl FromStr for Granularity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(Granularity::Day),
            "month" => Ok(Granularity::Month),
            other => Err(DomainError::InvalidInput(format!(
                "Unknown granularity: {}",
                other
            ))),
        }
    }
}

/// Date attached to one aggregated backend row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventDate {
    /// Already a calendar day in the gym's zone
    Day(NaiveDate),
    /// An instant that still has to be re-keyed into the zone
    Instant(DateTime<Utc>),
}

impl EventDate {
    /// Accepts `YYYY-MM-DD`, a month-grouped `YYYY-MM` (keyed to the 1st),
    /// or any instant [`parse_instant`] understands.
    pub fn parse(raw: &str) -> Option<Self> {
        parse_date_key(raw)
            .or_else(|| parse_month_key(raw))
            .map(EventDate::Day)
            .or_else(|| parse_instant(raw).map(EventDate::Instant))
    }

    pub fn local_date(&self, calendar: &ZoneCalendar) -> NaiveDate {
        match self {
            EventDate::Day(date) => *date,
            EventDate::Instant(instant) => calendar.local_date(*instant),
        }
    }
}

fn parse_month_key(raw: &str) -> Option<NaiveDate> {
    let (year, month) = raw.trim().split_once('-')?;
    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if year.len() != 4 || month.len() != 2 || !digits(year) || !digits(month) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

/// One pre-aggregated row from the range endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendEvent {
    pub date: EventDate,
    pub count: u64,
}

impl TrendEvent {
    pub fn on_day(date: NaiveDate, count: u64) -> Self {
        Self {
            date: EventDate::Day(date),
            count,
        }
    }
}

/// One slot of the zero-filled series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBucket {
    pub label: String,
    pub count: u64,
}
