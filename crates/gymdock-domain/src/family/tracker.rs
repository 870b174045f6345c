use std::collections::HashSet;

use chrono::NaiveDate;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::resolver::{normalize_name, resolve_from_pending};
use super::roster::FamilyRoster;
use crate::shared::DomainError;

/// Family check-in progress within one attendance period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FamilyCheckInState {
    /// No status has been fetched yet for this period
    Unknown,
    /// At least one active member still has to check in
    Partial,
    /// Every active member has checked in
    Complete,
}

/// What to assume when the status fetch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFailurePolicy {
    /// Keep whatever was last known; an unknown family stays unknown
    #[default]
    PreserveLastKnown,
    /// Treat the family as fully checked in
    FailOptimistic,
}

/// Tracks which members of one family have checked in during one local day.
#[derive(Debug, Clone)]
pub struct FamilyCheckInTracker {
    email: String,
    period: NaiveDate,
    roster_names: Vec<String>,
    checked_in: HashSet<String>,
    state: FamilyCheckInState,
}

impl FamilyCheckInTracker {
    pub fn new(email: impl Into<String>, period: NaiveDate) -> Self {
        Self {
            email: email.into(),
            period,
            roster_names: Vec::new(),
            checked_in: HashSet::new(),
            state: FamilyCheckInState::Unknown,
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn period(&self) -> NaiveDate {
        self.period
    }

    pub fn state(&self) -> FamilyCheckInState {
        self.state
    }

    /// Active roster names as of the last status or roster sync.
    pub fn roster_names(&self) -> &[String] {
        &self.roster_names
    }

    /// Active names still awaiting a check-in, in roster order.
    pub fn pending(&self) -> Vec<String> {
        if self.state == FamilyCheckInState::Unknown {
            return Vec::new();
        }
        self.roster_names
            .iter()
            .filter(|name| !self.checked_in.contains(&normalize_name(name)))
            .cloned()
            .collect()
    }

    /// Start a fresh period when the local day has changed.
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        if today == self.period {
            return false;
        }
        debug!(
            "[family] period rollover email={} from={} to={}",
            self.email, self.period, today
        );
        self.period = today;
        self.checked_in.clear();
        self.state = FamilyCheckInState::Unknown;
        true
    }

    /// Apply a fresh status report: the backend's list of names not yet
    /// checked in this period.
    pub fn apply_status<S: AsRef<str>>(
        &mut self,
        roster: &FamilyRoster,
        not_checked_in: &[S],
    ) -> FamilyCheckInState {
        let pending = resolve_from_pending(roster, not_checked_in);
        let pending: HashSet<String> = pending.iter().map(|name| normalize_name(name)).collect();

        self.roster_names = roster.active_names();
        self.checked_in = self
            .roster_names
            .iter()
            .map(|name| normalize_name(name))
            .filter(|name| !pending.contains(name))
            .collect();

        self.recompute();
        self.state
    }

    /// React to a failed status fetch according to `policy`.
    pub fn apply_status_failure(&mut self, policy: StatusFailurePolicy) -> FamilyCheckInState {
        match policy {
            StatusFailurePolicy::PreserveLastKnown => {
                warn!(
                    "[family] status fetch failed, keeping last known state email={} state={:?}",
                    self.email, self.state
                );
            }
            StatusFailurePolicy::FailOptimistic => {
                warn!(
                    "[family] status fetch failed, assuming everyone checked in email={}",
                    self.email
                );
                self.checked_in = self
                    .roster_names
                    .iter()
                    .map(|name| normalize_name(name))
                    .collect();
                self.state = FamilyCheckInState::Complete;
            }
        }
        self.state
    }

    /// Replace the roster without a new status report.
    ///
    /// Members who joined are never assumed to have checked in, so a
    /// complete family becomes partial again.
    pub fn sync_roster(&mut self, roster: &FamilyRoster) -> FamilyCheckInState {
        self.roster_names = roster.active_names();
        let active: HashSet<String> = self
            .roster_names
            .iter()
            .map(|name| normalize_name(name))
            .collect();
        self.checked_in.retain(|name| active.contains(name));

        if self.state != FamilyCheckInState::Unknown {
            self.recompute();
        }
        self.state
    }

    /// Mark exactly the selected names as checked in.
    ///
    /// Every selected name must currently be pending. Returns the names in
    /// roster spelling.
    pub fn record_submission<S: AsRef<str>>(
        &mut self,
        selected: &[S],
    ) -> Result<Vec<String>, DomainError> {
        if self.state == FamilyCheckInState::Unknown {
            return Err(DomainError::Validation(format!(
                "Check-in status for {} has not been loaded",
                self.email
            )));
        }
        if selected.is_empty() {
            return Err(DomainError::Validation(
                "Select at least one member to check in".to_string(),
            ));
        }

        let pending = self.pending();
        let mut accepted = Vec::with_capacity(selected.len());
        for name in selected {
            let wanted = normalize_name(name.as_ref());
            match pending.iter().find(|p| normalize_name(p) == wanted) {
                Some(roster_name) => {
                    if !accepted.contains(roster_name) {
                        accepted.push(roster_name.clone());
                    }
                }
                None => {
                    return Err(DomainError::Validation(format!(
                        "{} is not awaiting check-in",
                        name.as_ref().trim()
                    )))
                }
            }
        }

        self.checked_in
            .extend(accepted.iter().map(|name| normalize_name(name)));
        self.recompute();
        Ok(accepted)
    }

    fn recompute(&mut self) {
        let outstanding = self
            .roster_names
            .iter()
            .any(|name| !self.checked_in.contains(&normalize_name(name)));
        self.state = if outstanding {
            FamilyCheckInState::Partial
        } else {
            FamilyCheckInState::Complete
        };
    }
}
