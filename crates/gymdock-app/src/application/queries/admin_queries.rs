use std::sync::Arc;

use log::debug;

use crate::application::dtos::{TodayCheckInDto, TodaySnapshotDto};
use gymdock_domain::gateway::{AdminOverview, AttendanceReports};
use gymdock_domain::trend::DateRange;
use gymdock_domain::{Clock, DomainError, ZoneCalendar};

pub struct AdminQueries {
    reports: Arc<dyn AttendanceReports>,
    clock: Arc<dyn Clock>,
    calendar: ZoneCalendar,
}

impl AdminQueries {
    pub fn new(
        reports: Arc<dyn AttendanceReports>,
        clock: Arc<dyn Clock>,
        calendar: ZoneCalendar,
    ) -> Self {
        Self {
            reports,
            clock,
            calendar,
        }
    }

    pub async fn get_overview(&self) -> Result<AdminOverview, DomainError> {
        self.reports.overview().await
    }

    /// Today's check-ins, newest first, together with the headline counts.
    pub async fn get_today(&self) -> Result<TodaySnapshotDto, DomainError> {
        let (overview, rows) =
            tokio::try_join!(self.reports.overview(), self.reports.todays_check_ins())?;

        let mut rows = rows;
        rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        let check_ins: Vec<TodayCheckInDto> = rows
            .into_iter()
            .map(|row| TodayCheckInDto {
                checkin_id: row.checkin_id.to_string(),
                member_code: row.member_code,
                name: row.name,
                local_time: self
                    .calendar
                    .to_local(row.timestamp)
                    .format("%H:%M:%S")
                    .to_string(),
            })
            .collect();

        debug!(
            "[poll] today fetched rows={} checkins_today={}",
            check_ins.len(),
            overview.checkins_today
        );

        Ok(TodaySnapshotDto {
            overview,
            check_ins,
            fetched_at: self
                .calendar
                .now_in_zone(self.clock.as_ref())
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
        })
    }

    /// The last `days` local days, ending today.
    pub fn default_range(&self, days: u32) -> Result<DateRange, DomainError> {
        DateRange::last_n_days(self.calendar.local_date(self.clock.now()), days)
    }
}
