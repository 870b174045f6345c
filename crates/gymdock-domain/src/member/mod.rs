use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{CheckInId, DomainError, MemberId};

/// A registered member as the backend knows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfile {
    pub id: MemberId,
    /// Code printed on the member's tag (NFC/QR)
    pub member_code: String,
    pub name: String,
    pub active: bool,
    pub created_at: Option<DateTime<Utc>>,
}

/// Registration input from the kiosk form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMember {
    member_code: String,
    name: String,
    active: bool,
}

impl NewMember {
    pub fn new(member_code: &str, name: &str) -> Result<Self, DomainError> {
        let member_code = member_code.trim();
        let name = name.trim();

        if member_code.is_empty() {
            return Err(DomainError::Validation(
                "Member code cannot be empty".to_string(),
            ));
        }
        if name.is_empty() {
            return Err(DomainError::Validation(
                "Member name cannot be empty".to_string(),
            ));
        }
        if name.chars().count() > 100 {
            return Err(DomainError::Validation(
                "Member name cannot exceed 100 characters".to_string(),
            ));
        }

        Ok(Self {
            member_code: member_code.to_string(),
            name: name.to_string(),
            active: true,
        })
    }

    pub fn member_code(&self) -> &str {
        &self.member_code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn active(&self) -> bool {
        self.active
    }
}

/// Profile edit from the stats page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfileUpdate {
    name: String,
    email: String,
}

impl MemberProfileUpdate {
    pub fn new(name: &str, email: &str) -> Result<Self, DomainError> {
        let name = name.trim();
        let email = email.trim();

        if name.is_empty() {
            return Err(DomainError::Validation(
                "Member name cannot be empty".to_string(),
            ));
        }
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => {
                return Err(DomainError::Validation(format!(
                    "Invalid email address: {}",
                    email
                )))
            }
        }

        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Acknowledgement of a single check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInReceipt {
    pub id: CheckInId,
    pub member_id: MemberId,
    pub timestamp: DateTime<Utc>,
}
