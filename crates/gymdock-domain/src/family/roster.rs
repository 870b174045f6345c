use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{DomainError, MemberId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyMember {
    pub id: MemberId,
    pub name: String,
    pub email: String,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl FamilyMember {
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }
}

/// Member identities grouped under one contact email.
///
/// Deleted members keep their history but take no part in check-in
/// resolution or active displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyRoster {
    email: String,
    members: Vec<FamilyMember>,
}

impl FamilyRoster {
    pub fn new(email: impl Into<String>, members: Vec<FamilyMember>) -> Result<Self, DomainError> {
        let email = email.into().trim().to_string();
        if email.is_empty() {
            return Err(DomainError::Validation(
                "Family email cannot be empty".to_string(),
            ));
        }
        Ok(Self { email, members })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn members(&self) -> &[FamilyMember] {
        &self.members
    }

    pub fn active_members(&self) -> impl Iterator<Item = &FamilyMember> {
        self.members.iter().filter(|member| member.is_active())
    }

    /// Active member names in roster order.
    pub fn active_names(&self) -> Vec<String> {
        self.active_members().map(|member| member.name.clone()).collect()
    }

    pub fn active_count(&self) -> usize {
        self.active_members().count()
    }

    /// A roster with more than one active member is shown as a family account.
    pub fn is_family(&self) -> bool {
        self.active_count() > 1
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    pub fn find(&self, id: &MemberId) -> Option<&FamilyMember> {
        self.members.iter().find(|member| &member.id == id)
    }
}
