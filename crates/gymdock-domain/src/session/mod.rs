use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::attendance::WeeklyGoal;
use crate::family::FamilyRoster;
use crate::shared::{DomainError, MemberId};

/// Identity the kiosk remembers between runs.
///
/// Callers load it once and pass the pieces they need into queries; the
/// aggregation code never reads it directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    #[serde(default)]
    pub member_id: Option<MemberId>,
    #[serde(default)]
    pub member_email: Option<String>,
    #[serde(default)]
    pub family_members: Vec<String>,
    #[serde(default)]
    pub weekly_goal: WeeklyGoal,
}

impl SessionContext {
    pub fn for_member(member_id: MemberId) -> Self {
        Self {
            member_id: Some(member_id),
            ..Self::default()
        }
    }

    /// The stored member id, provided it is still a well-formed id.
    pub fn valid_member_id(&self) -> Option<&MemberId> {
        self.member_id
            .as_ref()
            .filter(|id| MemberId::is_valid(id.as_str()))
    }

    pub fn require_member_id(&self) -> Result<&MemberId, DomainError> {
        self.valid_member_id()
            .ok_or_else(|| DomainError::MissingSession("no member checked in".to_string()))
    }

    pub fn require_email(&self) -> Result<&str, DomainError> {
        self.member_email
            .as_deref()
            .filter(|email| !email.trim().is_empty())
            .ok_or_else(|| DomainError::MissingSession("no family email stored".to_string()))
    }

    pub fn is_family(&self) -> bool {
        self.family_members.len() > 1
    }

    /// Mirror the latest roster into the session.
    pub fn remember_roster(&mut self, roster: &FamilyRoster) {
        self.member_email = Some(roster.email().to_string());
        self.family_members = roster.active_names();
    }

    /// Drop identity but keep the member's weekly goal preference.
    pub fn forget_identity(&mut self) {
        self.member_id = None;
        self.member_email = None;
        self.family_members.clear();
    }
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the stored session; an absent or unreadable store yields the default.
    async fn load(&self) -> Result<SessionContext, DomainError>;

    async fn save(&self, session: &SessionContext) -> Result<(), DomainError>;

    async fn clear(&self) -> Result<(), DomainError>;
}
