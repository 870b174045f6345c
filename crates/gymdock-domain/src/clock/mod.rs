//! Wall-clock normalisation for attendance counting.
//!
//! Check-ins are stored as absolute instants while members reason about
//! attendance in local civil days. Every "same day", "this week" and bucket
//! comparison goes through a [`ZoneCalendar`] so that all of them agree on a
//! single definition of a day, independent of the host timezone.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::shared::DomainError;

#[cfg(test)]
mod clock_test;

/// Civil timezone the gym operates in.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Toronto;

/// Canonical day key format (`YYYY-MM-DD`).
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the host clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Calendar arithmetic pinned to one civil timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneCalendar {
    tz: Tz,
}

impl Default for ZoneCalendar {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEZONE)
    }
}

impl ZoneCalendar {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Build a calendar from an IANA zone name such as `America/Toronto`.
    pub fn from_name(name: &str) -> Result<Self, DomainError> {
        name.trim()
            .parse::<Tz>()
            .map(Self::new)
            .map_err(|_| DomainError::InvalidInput(format!("Unknown timezone: {}", name)))
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn to_local(&self, instant: DateTime<Utc>) -> DateTime<Tz> {
        instant.with_timezone(&self.tz)
    }

    /// The current moment rendered in the calendar's zone.
    pub fn now_in_zone(&self, clock: &dyn Clock) -> DateTime<Tz> {
        self.to_local(clock.now())
    }

    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.to_local(instant).date_naive()
    }

    /// Zone-local `YYYY-MM-DD` key of an instant.
    pub fn date_key(&self, instant: DateTime<Utc>) -> String {
        self.local_date(instant).format(DATE_KEY_FORMAT).to_string()
    }

    /// Zone-local Monday 00:00 of the ISO week containing `instant`.
    pub fn monday_of_week(&self, instant: DateTime<Utc>) -> DateTime<Tz> {
        self.local_midnight(monday_of(self.local_date(instant)))
    }

    /// First instant of `date` in the zone.
    ///
    /// When midnight falls in a DST gap the first valid local time after it
    /// is used; on an ambiguous midnight the earlier of the two is used.
    pub fn local_midnight(&self, date: NaiveDate) -> DateTime<Tz> {
        let naive = date.and_time(NaiveTime::MIN);
        self.tz
            .from_local_datetime(&naive)
            .earliest()
            .or_else(|| {
                self.tz
                    .from_local_datetime(&(naive + Duration::hours(1)))
                    .earliest()
            })
            .unwrap_or_else(|| self.tz.from_utc_datetime(&naive))
    }
}

/// Monday of the ISO week containing `date`; Sunday belongs to the week
/// that started six days earlier.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// First day of the month containing `date`.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Parse a backend timestamp.
///
/// RFC 3339 strings keep their offset. Naive ISO date-times carry no offset
/// because the backend records `utcnow()`, so they are read as UTC. Returns
/// `None` for anything else.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Parse a `YYYY-MM-DD` day key.
pub fn parse_date_key(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_KEY_FORMAT).ok()
}
