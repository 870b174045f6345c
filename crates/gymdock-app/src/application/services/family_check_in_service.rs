use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use log::{debug, info, warn};
use tokio::sync::Mutex;

use crate::application::dtos::{FamilyCheckInOutcomeDto, FamilyStatusDto};
use gymdock_domain::clock::DATE_KEY_FORMAT;
use gymdock_domain::family::{
    FamilyCheckInState, FamilyCheckInTracker, FamilyRoster, StatusFailurePolicy,
};
use gymdock_domain::gateway::FamilyDirectory;
use gymdock_domain::{Clock, DomainError, ZoneCalendar};

/// Holds one check-in tracker per family email for the current local day.
pub struct FamilyCheckInService {
    families: Arc<dyn FamilyDirectory>,
    clock: Arc<dyn Clock>,
    calendar: ZoneCalendar,
    policy: StatusFailurePolicy,
    trackers: Mutex<HashMap<String, FamilyCheckInTracker>>,
}

fn tracker_key(email: &str) -> String {
    email.trim().to_lowercase()
}

fn status_dto(tracker: &FamilyCheckInTracker) -> FamilyStatusDto {
    FamilyStatusDto {
        email: tracker.email().to_string(),
        period: tracker.period().format(DATE_KEY_FORMAT).to_string(),
        state: tracker.state(),
        active_names: tracker.roster_names().to_vec(),
        pending: tracker.pending(),
    }
}

impl FamilyCheckInService {
    pub fn new(
        families: Arc<dyn FamilyDirectory>,
        clock: Arc<dyn Clock>,
        calendar: ZoneCalendar,
        policy: StatusFailurePolicy,
    ) -> Self {
        Self {
            families,
            clock,
            calendar,
            policy,
            trackers: Mutex::new(HashMap::new()),
        }
    }

    fn today(&self) -> NaiveDate {
        self.calendar.local_date(self.clock.now())
    }

    /// Fetch roster and status and fold them into the family's tracker.
    ///
    /// A roster failure is returned to the caller; a status failure is
    /// handled by the configured policy.
    pub async fn refresh(&self, email: &str) -> Result<FamilyStatusDto, DomainError> {
        let roster = self.families.roster(email).await?;
        let status = self.families.pending_check_ins(roster.email()).await;
        let today = self.today();

        let mut trackers = self.trackers.lock().await;
        let tracker = Self::tracker_for(&mut trackers, &roster, today);

        match status {
            Ok(not_checked_in) => {
                tracker.apply_status(&roster, &not_checked_in);
            }
            Err(e) => {
                warn!(
                    "[family] status fetch failed email={} error={}",
                    roster.email(),
                    e.format_with_code()
                );
                tracker.sync_roster(&roster);
                tracker.apply_status_failure(self.policy);
            }
        }

        info!(
            "[family] refreshed email={} state={:?} pending={}",
            tracker.email(),
            tracker.state(),
            tracker.pending().len()
        );
        Ok(status_dto(tracker))
    }

    /// Apply a roster change without asking for a new status.
    pub async fn sync_roster(&self, email: &str) -> Result<FamilyStatusDto, DomainError> {
        let roster = self.families.roster(email).await?;
        let today = self.today();

        let mut trackers = self.trackers.lock().await;
        let tracker = Self::tracker_for(&mut trackers, &roster, today);
        tracker.sync_roster(&roster);
        Ok(status_dto(tracker))
    }

    /// Check in the selected names.
    ///
    /// The selection is validated against the tracker before anything is
    /// sent; the tracker only changes once the backend accepts it.
    pub async fn submit(
        &self,
        email: &str,
        member_names: &[String],
    ) -> Result<FamilyCheckInOutcomeDto, DomainError> {
        let key = tracker_key(email);
        let today = self.today();

        let needs_refresh = {
            let mut trackers = self.trackers.lock().await;
            match trackers.get_mut(&key) {
                Some(tracker) => {
                    tracker.roll_over(today);
                    tracker.state() == FamilyCheckInState::Unknown
                }
                None => true,
            }
        };
        if needs_refresh {
            self.refresh(email).await?;
        }

        let (family_email, accepted) = {
            let trackers = self.trackers.lock().await;
            let mut candidate = trackers.get(&key).cloned().ok_or_else(|| {
                DomainError::FamilyNotFound(format!("No check-in status for {}", email))
            })?;
            let accepted = candidate.record_submission(member_names)?;
            (candidate.email().to_string(), accepted)
        };

        let message = self
            .families
            .check_in_family(&family_email, &accepted)
            .await?;

        let mut trackers = self.trackers.lock().await;
        let tracker = trackers.get_mut(&key).ok_or_else(|| {
            DomainError::FamilyNotFound(format!("No check-in status for {}", email))
        })?;
        if let Err(e) = tracker.record_submission(&accepted) {
            debug!(
                "[family] tracker moved on during submission email={} reason={}",
                family_email,
                e.message()
            );
        }

        Ok(FamilyCheckInOutcomeDto {
            message,
            checked_in: accepted,
            status: status_dto(tracker),
        })
    }

    /// Last known status without touching the backend.
    pub async fn cached_status(&self, email: &str) -> Option<FamilyStatusDto> {
        let today = self.today();
        let mut trackers = self.trackers.lock().await;
        let tracker = trackers.get_mut(&tracker_key(email))?;
        tracker.roll_over(today);
        Some(status_dto(tracker))
    }

    fn tracker_for<'a>(
        trackers: &'a mut HashMap<String, FamilyCheckInTracker>,
        roster: &FamilyRoster,
        today: NaiveDate,
    ) -> &'a mut FamilyCheckInTracker {
        let tracker = trackers
            .entry(tracker_key(roster.email()))
            .or_insert_with(|| FamilyCheckInTracker::new(roster.email(), today));
        tracker.roll_over(today);
        tracker
    }
}
