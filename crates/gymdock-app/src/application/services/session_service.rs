use std::sync::Arc;

use log::{info, warn};

use gymdock_domain::attendance::WeeklyGoal;
use gymdock_domain::family::FamilyRoster;
use gymdock_domain::session::{SessionContext, SessionStore};
use gymdock_domain::{DomainError, MemberId};

/// Reads and updates the kiosk's remembered identity.
pub struct SessionService {
    store: Arc<dyn SessionStore>,
    default_goal: WeeklyGoal,
}

impl SessionService {
    pub fn new(store: Arc<dyn SessionStore>, default_goal: WeeklyGoal) -> Self {
        Self {
            store,
            default_goal,
        }
    }

    /// The stored session; a kiosk with nothing stored starts at the
    /// configured goal.
    pub async fn current(&self) -> Result<SessionContext, DomainError> {
        let session = self.store.load().await?;
        if session == SessionContext::default() {
            return Ok(SessionContext {
                weekly_goal: self.default_goal,
                ..session
            });
        }
        Ok(session)
    }

    /// Switch to `member_id`. Family data from a previous member is dropped.
    pub async fn remember_member(
        &self,
        member_id: MemberId,
    ) -> Result<SessionContext, DomainError> {
        let mut session = self.current().await?;
        if session.member_id.as_ref() != Some(&member_id) {
            session.forget_identity();
            session.member_id = Some(member_id);
            self.store.save(&session).await?;
        }
        Ok(session)
    }

    pub async fn remember_email(&self, email: &str) -> Result<SessionContext, DomainError> {
        let mut session = self.current().await?;
        session.member_email = Some(email.trim().to_string());
        self.store.save(&session).await?;
        Ok(session)
    }

    pub async fn set_goal(&self, goal: WeeklyGoal) -> Result<SessionContext, DomainError> {
        let mut session = self.current().await?;
        session.weekly_goal = goal;
        self.store.save(&session).await?;
        info!("[session] weekly goal set goal={}", goal.value());
        Ok(session)
    }

    /// Mirror a fresh roster. A roster with no active members means the
    /// family no longer exists, so the identity is forgotten.
    pub async fn remember_roster(
        &self,
        roster: &FamilyRoster,
    ) -> Result<SessionContext, DomainError> {
        let mut session = self.current().await?;
        if roster.active_count() == 0 {
            warn!(
                "[session] family has no active members, clearing identity email={}",
                roster.email()
            );
            session.forget_identity();
        } else {
            session.remember_roster(roster);
        }
        self.store.save(&session).await?;
        Ok(session)
    }

    /// Forget the identity when `error` says the backend no longer knows it.
    /// Returns whether anything was forgotten.
    pub async fn forget_if_missing(&self, error: &DomainError) -> Result<bool, DomainError> {
        if !matches!(
            error,
            DomainError::MemberNotFound(_) | DomainError::FamilyNotFound(_)
        ) {
            return Ok(false);
        }

        let mut session = self.current().await?;
        if session.member_id.is_none() && session.member_email.is_none() {
            return Ok(false);
        }

        warn!("[session] clearing identity after lookup failure: {}", error);
        session.forget_identity();
        self.store.save(&session).await?;
        Ok(true)
    }

    pub async fn clear(&self) -> Result<(), DomainError> {
        self.store.clear().await?;
        info!("[session] cleared");
        Ok(())
    }
}
