// In-memory backend and session store shared by the application tests

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use tokio::sync::{Mutex, RwLock};

use gymdock_domain::attendance::{MemberAttendanceRecord, MemberStatsSnapshot};
use gymdock_domain::family::{FamilyMember, FamilyRoster};
use gymdock_domain::gateway::{
    AdminOverview, AttendanceReports, FamilyDirectory, MemberDirectory, TodayCheckIn,
};
use gymdock_domain::member::{CheckInReceipt, MemberProfile, MemberProfileUpdate, NewMember};
use gymdock_domain::session::{SessionContext, SessionStore};
use gymdock_domain::shared::CheckInId;
use gymdock_domain::trend::{Granularity, TrendEvent};
use gymdock_domain::{DomainError, FixedClock, MemberId, ZoneCalendar};

pub const ALICE_ID: &str = "6f1c2d3e-4a5b-4c6d-8e7f-0123456789ab";

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Wednesday 2024-03-13, 10:00 in Toronto.
pub fn fixed_now() -> DateTime<Utc> {
    utc(2024, 3, 13, 14, 0)
}

pub fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(fixed_now()))
}

pub fn calendar() -> ZoneCalendar {
    ZoneCalendar::from_name("America/Toronto").unwrap()
}

pub fn member(name: &str, email: &str, deleted: bool) -> FamilyMember {
    FamilyMember {
        id: MemberId::from_string(&format!(
            "00000000-0000-4000-8000-{:012x}",
            name.len() * 7919 + name.bytes().map(usize::from).sum::<usize>()
        )),
        name: name.to_string(),
        email: email.to_string(),
        is_deleted: deleted,
        deleted_at: if deleted { Some(fixed_now()) } else { None },
    }
}

pub fn roster(email: &str, names: &[&str]) -> FamilyRoster {
    FamilyRoster::new(
        email,
        names.iter().map(|name| member(name, email, false)).collect(),
    )
    .unwrap()
}

#[derive(Default)]
pub struct FakeBackend {
    members: RwLock<HashMap<String, MemberProfile>>,
    emails: RwLock<HashMap<String, String>>,
    stats: RwLock<HashMap<String, MemberStatsSnapshot>>,
    check_ins: RwLock<Vec<String>>,
    next_id: AtomicUsize,

    rosters: RwLock<HashMap<String, FamilyRoster>>,
    pending: RwLock<HashMap<String, Vec<String>>>,
    family_submissions: RwLock<Vec<(String, Vec<String>)>>,
    pub status_fails: AtomicBool,
    pub family_check_in_fails: AtomicBool,

    range_events: RwLock<Vec<TrendEvent>>,
    range_delays: Mutex<VecDeque<Duration>>,
    range_calls: RwLock<Vec<(NaiveDate, NaiveDate, Granularity)>>,
    overview: RwLock<AdminOverview>,
    today: RwLock<Vec<TodayCheckIn>>,
    pub reports_fail: AtomicBool,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn now(&self) -> DateTime<Utc> {
        fixed_now()
    }

    pub async fn add_member(&self, id: &str, member_code: &str, name: &str) {
        self.members.write().await.insert(
            id.to_string(),
            MemberProfile {
                id: MemberId::from_string(id),
                member_code: member_code.to_string(),
                name: name.to_string(),
                active: true,
                created_at: Some(utc(2023, 1, 5, 15, 0)),
            },
        );
    }

    pub async fn set_check_in_history(&self, id: &str, timestamps: &[&str]) {
        let raw: Vec<String> = timestamps.iter().map(|t| t.to_string()).collect();
        let name = self
            .members
            .read()
            .await
            .get(id)
            .map(|profile| profile.name.clone());
        self.stats.write().await.insert(
            id.to_string(),
            MemberStatsSnapshot {
                name,
                email: Some("alice@example.com".to_string()),
                member_since: Some(utc(2023, 1, 5, 15, 0)),
                barcode: Some("TAG-ALICE".to_string()),
                reported_monthly: None,
                reported_current_streak: None,
                reported_highest_streak: None,
                record: MemberAttendanceRecord::from_raw(MemberId::from_string(id), Some(&raw)),
            },
        );
    }

    pub async fn member_email(&self, id: &str) -> Option<String> {
        self.emails.read().await.get(id).cloned()
    }

    pub async fn check_in_keys(&self) -> Vec<String> {
        self.check_ins.read().await.clone()
    }

    pub async fn add_family(&self, roster: FamilyRoster, pending: &[&str]) {
        let key = roster.email().to_lowercase();
        self.pending
            .write()
            .await
            .insert(key.clone(), pending.iter().map(|n| n.to_string()).collect());
        self.rosters.write().await.insert(key, roster);
    }

    pub async fn set_pending(&self, email: &str, pending: &[&str]) {
        self.pending.write().await.insert(
            email.to_lowercase(),
            pending.iter().map(|n| n.to_string()).collect(),
        );
    }

    pub async fn family_submissions(&self) -> Vec<(String, Vec<String>)> {
        self.family_submissions.read().await.clone()
    }

    pub async fn set_range_events(&self, events: Vec<TrendEvent>) {
        *self.range_events.write().await = events;
    }

    /// Delay applied to the next range calls, in call order.
    pub async fn push_range_delay(&self, delay: Duration) {
        self.range_delays.lock().await.push_back(delay);
    }

    pub async fn range_calls(&self) -> Vec<(NaiveDate, NaiveDate, Granularity)> {
        self.range_calls.read().await.clone()
    }

    pub async fn set_overview(&self, overview: AdminOverview) {
        *self.overview.write().await = overview;
    }

    pub async fn set_today(&self, rows: Vec<TodayCheckIn>) {
        *self.today.write().await = rows;
    }

    fn reports_error(&self) -> Result<(), DomainError> {
        if self.reports_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Network("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl MemberDirectory for FakeBackend {
    async fn find_member(&self, id: &MemberId) -> Result<Option<MemberProfile>, DomainError> {
        Ok(self.members.read().await.get(id.as_str()).cloned())
    }

    async fn register_member(&self, member: &NewMember) -> Result<MemberProfile, DomainError> {
        let mut members = self.members.write().await;
        if members
            .values()
            .any(|profile| profile.member_code == member.member_code())
        {
            return Err(DomainError::Validation("Member ID already exists".to_string()));
        }

        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let id = format!("11111111-2222-4333-8444-{:012}", n);
        let profile = MemberProfile {
            id: MemberId::from_string(&id),
            member_code: member.member_code().to_string(),
            name: member.name().to_string(),
            active: member.active(),
            created_at: Some(self.now()),
        };
        members.insert(id, profile.clone());
        Ok(profile)
    }

    async fn update_member(
        &self,
        id: &MemberId,
        update: &MemberProfileUpdate,
    ) -> Result<(), DomainError> {
        let mut members = self.members.write().await;
        let profile = members
            .get_mut(id.as_str())
            .ok_or_else(|| DomainError::MemberNotFound(id.to_string()))?;
        profile.name = update.name().to_string();
        self.emails
            .write()
            .await
            .insert(id.to_string(), update.email().to_string());
        Ok(())
    }

    async fn check_in(&self, member_key: &str) -> Result<CheckInReceipt, DomainError> {
        let members = self.members.read().await;
        let profile = members
            .values()
            .find(|profile| profile.id.as_str() == member_key || profile.member_code == member_key)
            .ok_or_else(|| DomainError::MemberNotFound(member_key.to_string()))?;

        let mut check_ins = self.check_ins.write().await;
        check_ins.push(member_key.to_string());

        Ok(CheckInReceipt {
            id: CheckInId::from_string(&format!("checkin-{}", check_ins.len())),
            member_id: profile.id.clone(),
            timestamp: self.now(),
        })
    }

    async fn member_stats(&self, id: &MemberId) -> Result<MemberStatsSnapshot, DomainError> {
        self.stats
            .read()
            .await
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| DomainError::MemberNotFound(id.to_string()))
    }
}

#[async_trait::async_trait]
impl FamilyDirectory for FakeBackend {
    async fn roster(&self, email: &str) -> Result<FamilyRoster, DomainError> {
        self.rosters
            .read()
            .await
            .get(&email.trim().to_lowercase())
            .cloned()
            .ok_or_else(|| DomainError::FamilyNotFound(email.to_string()))
    }

    async fn pending_check_ins(&self, email: &str) -> Result<Vec<String>, DomainError> {
        if self.status_fails.load(Ordering::SeqCst) {
            return Err(DomainError::Timeout("status request timed out".to_string()));
        }
        Ok(self
            .pending
            .read()
            .await
            .get(&email.trim().to_lowercase())
            .cloned()
            .unwrap_or_default())
    }

    async fn check_in_family(
        &self,
        email: &str,
        member_names: &[String],
    ) -> Result<String, DomainError> {
        if self.family_check_in_fails.load(Ordering::SeqCst) {
            return Err(DomainError::CheckInFailed("backend rejected".to_string()));
        }

        let key = email.trim().to_lowercase();
        if let Some(pending) = self.pending.write().await.get_mut(&key) {
            pending.retain(|name| !member_names.iter().any(|n| n.eq_ignore_ascii_case(name)));
        }
        self.family_submissions
            .write()
            .await
            .push((email.to_string(), member_names.to_vec()));
        Ok(format!("Checked in: {}", member_names.join(", ")))
    }
}

#[async_trait::async_trait]
impl AttendanceReports for FakeBackend {
    async fn check_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        granularity: Granularity,
    ) -> Result<Vec<TrendEvent>, DomainError> {
        self.range_calls
            .write()
            .await
            .push((start, end, granularity));

        let delay = self.range_delays.lock().await.pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.reports_error()?;
        Ok(self.range_events.read().await.clone())
    }

    async fn overview(&self) -> Result<AdminOverview, DomainError> {
        self.reports_error()?;
        Ok(*self.overview.read().await)
    }

    async fn todays_check_ins(&self) -> Result<Vec<TodayCheckIn>, DomainError> {
        self.reports_error()?;
        Ok(self.today.read().await.clone())
    }
}

#[derive(Default)]
pub struct InMemorySessionStore {
    session: RwLock<Option<SessionContext>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(session: SessionContext) -> Self {
        Self {
            session: RwLock::new(Some(session)),
        }
    }

    pub async fn stored(&self) -> Option<SessionContext> {
        self.session.read().await.clone()
    }
}

#[async_trait::async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self) -> Result<SessionContext, DomainError> {
        Ok(self.session.read().await.clone().unwrap_or_default())
    }

    async fn save(&self, session: &SessionContext) -> Result<(), DomainError> {
        *self.session.write().await = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        *self.session.write().await = None;
        Ok(())
    }
}
