use std::collections::HashMap;

use chrono::{Months, NaiveDate};
use log::debug;

use super::{DateBucket, Granularity, TrendEvent};
use crate::clock::{first_of_month, ZoneCalendar, DATE_KEY_FORMAT};

/// Build the zero-filled series for `[start, end]`.
///
/// Rows whose bucket falls outside the range are dropped; rows sharing a
/// bucket are summed. In month mode the range is widened to whole months
/// first, so a row keyed to the 1st still lands in a range that starts
/// mid-month. Month buckets are labelled with their first day. An inverted
/// range yields an empty series.
pub fn bucket_range(
    start: NaiveDate,
    end: NaiveDate,
    granularity: Granularity,
    events: &[TrendEvent],
    calendar: &ZoneCalendar,
) -> Vec<DateBucket> {
    if start > end {
        return Vec::new();
    }

    let keys = bucket_keys(start, end, granularity);
    let first = bucket_key(start, granularity);
    let last = bucket_key(end, granularity);

    let mut lookup: HashMap<NaiveDate, u64> = HashMap::with_capacity(keys.len());
    let mut dropped = 0usize;
    for event in events {
        let key = bucket_key(event.date.local_date(calendar), granularity);
        if key < first || key > last {
            dropped += 1;
            continue;
        }
        *lookup.entry(key).or_insert(0) += event.count;
    }

    if dropped > 0 {
        debug!(
            "[trend] dropped rows outside range start={} end={} dropped={}",
            start, end, dropped
        );
    }

    keys.into_iter()
        .map(|key| DateBucket {
            label: key.format(DATE_KEY_FORMAT).to_string(),
            count: lookup.get(&key).copied().unwrap_or(0),
        })
        .collect()
}

fn bucket_key(date: NaiveDate, granularity: Granularity) -> NaiveDate {
    match granularity {
        Granularity::Day => date,
        Granularity::Month => first_of_month(date),
    }
}

/// Every bucket start in the range, ascending. Months always step from the
/// first of the month so short months never skip.
fn bucket_keys(start: NaiveDate, end: NaiveDate, granularity: Granularity) -> Vec<NaiveDate> {
    let mut keys = Vec::new();
    let last = bucket_key(end, granularity);
    let mut cursor = bucket_key(start, granularity);

    while cursor <= last {
        keys.push(cursor);
        let next = match granularity {
            Granularity::Day => cursor.succ_opt(),
            Granularity::Month => cursor.checked_add_months(Months::new(1)),
        };
        match next {
            Some(next) => cursor = next,
            None => break,
        }
    }

    keys
}
