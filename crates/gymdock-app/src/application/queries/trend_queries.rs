use std::sync::Arc;

use log::info;

use crate::application::dtos::TrendDto;
use gymdock_domain::clock::DATE_KEY_FORMAT;
use gymdock_domain::gateway::AttendanceReports;
use gymdock_domain::trend::{bucket_range, DateRange, Granularity};
use gymdock_domain::{DomainError, ZoneCalendar};

pub struct TrendQueries {
    reports: Arc<dyn AttendanceReports>,
    calendar: ZoneCalendar,
}

impl TrendQueries {
    pub fn new(reports: Arc<dyn AttendanceReports>, calendar: ZoneCalendar) -> Self {
        Self { reports, calendar }
    }

    /// Zero-filled check-in series over `range`.
    pub async fn get_trend(
        &self,
        range: DateRange,
        granularity: Granularity,
    ) -> Result<TrendDto, DomainError> {
        let events = self
            .reports
            .check_in_range(range.start(), range.end(), granularity)
            .await?;

        let buckets = bucket_range(
            range.start(),
            range.end(),
            granularity,
            &events,
            &self.calendar,
        );
        let total = buckets.iter().map(|bucket| bucket.count).sum();

        info!(
            "[trend] get_trend start={} end={} granularity={} buckets={} total={}",
            range.start(),
            range.end(),
            granularity,
            buckets.len(),
            total
        );

        Ok(TrendDto {
            start_date: range.start().format(DATE_KEY_FORMAT).to_string(),
            end_date: range.end().format(DATE_KEY_FORMAT).to_string(),
            granularity,
            buckets,
            total,
        })
    }
}
