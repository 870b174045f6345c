use async_trait::async_trait;
use chrono::NaiveDate;
use gymdock_domain::clock::DATE_KEY_FORMAT;
use gymdock_domain::gateway::{AdminOverview, AttendanceReports, TodayCheckIn};
use gymdock_domain::trend::{Granularity, TrendEvent};
use gymdock_domain::DomainError;

use super::error::to_domain_error;
use super::types::{
    into_today_check_ins, into_trend_events, OverviewPayload, RangeRowPayload, TodayRowPayload,
};
use super::HttpBackend;

#[async_trait]
impl AttendanceReports for HttpBackend {
    async fn check_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        granularity: Granularity,
    ) -> Result<Vec<TrendEvent>, DomainError> {
        let mut url = self
            .endpoint(&["admin", "checkins", "range"])
            .map_err(|e| to_domain_error(e, DomainError::NotFound))?;
        url.query_pairs_mut()
            .append_pair("start_date", &start.format(DATE_KEY_FORMAT).to_string())
            .append_pair("end_date", &end.format(DATE_KEY_FORMAT).to_string())
            .append_pair("group_by", granularity.as_query_param());

        let rows: Vec<RangeRowPayload> = self
            .get_json("Check-in range", url)
            .await
            .map_err(|e| to_domain_error(e, DomainError::NotFound))?;

        Ok(into_trend_events(rows))
    }

    async fn overview(&self) -> Result<AdminOverview, DomainError> {
        let url = self
            .endpoint(&["admin", "checkins", "stats"])
            .map_err(|e| to_domain_error(e, DomainError::NotFound))?;

        let payload: OverviewPayload = self
            .get_json("Check-in overview", url)
            .await
            .map_err(|e| to_domain_error(e, DomainError::NotFound))?;

        Ok(payload.into())
    }

    async fn todays_check_ins(&self) -> Result<Vec<TodayCheckIn>, DomainError> {
        let url = self
            .endpoint(&["admin", "checkins", "today"])
            .map_err(|e| to_domain_error(e, DomainError::NotFound))?;

        let rows: Vec<TodayRowPayload> = self
            .get_json("Today's check-ins", url)
            .await
            .map_err(|e| to_domain_error(e, DomainError::NotFound))?;

        Ok(into_today_check_ins(rows))
    }
}
