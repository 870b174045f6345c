use async_trait::async_trait;
use gymdock_domain::family::FamilyRoster;
use gymdock_domain::gateway::FamilyDirectory;
use gymdock_domain::DomainError;
use log::info;
use reqwest::Method;

use super::error::to_domain_error;
use super::types::{CheckInStatusPayload, FamilyCheckInRequest, FamilyMemberPayload, MessagePayload};
use super::HttpBackend;

fn require_email(email: &str) -> Result<&str, DomainError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(DomainError::Validation(
            "Family email cannot be empty".to_string(),
        ));
    }
    Ok(email)
}

#[async_trait]
impl FamilyDirectory for HttpBackend {
    async fn roster(&self, email: &str) -> Result<FamilyRoster, DomainError> {
        let email = require_email(email)?;
        let url = self
            .endpoint(&["family", "members", email])
            .map_err(|e| to_domain_error(e, DomainError::NotFound))?;

        let members: Vec<FamilyMemberPayload> = self
            .get_json("Family roster", url)
            .await
            .map_err(|e| to_domain_error(e, DomainError::FamilyNotFound))?;

        let members = members
            .into_iter()
            .map(|payload| payload.into_member(email))
            .collect();
        FamilyRoster::new(email, members)
    }

    async fn pending_check_ins(&self, email: &str) -> Result<Vec<String>, DomainError> {
        let email = require_email(email)?;
        let url = self
            .endpoint(&["family", "checkin-status", email])
            .map_err(|e| to_domain_error(e, DomainError::NotFound))?;

        let payload: CheckInStatusPayload = self
            .get_json("Family check-in status", url)
            .await
            .map_err(|e| to_domain_error(e, DomainError::FamilyNotFound))?;

        Ok(payload.not_checked_in)
    }

    async fn check_in_family(
        &self,
        email: &str,
        member_names: &[String],
    ) -> Result<String, DomainError> {
        let email = require_email(email)?;
        if member_names.is_empty() {
            return Err(DomainError::Validation(
                "Select at least one family member".to_string(),
            ));
        }

        let url = self
            .endpoint(&["family", "checkin"])
            .map_err(|e| to_domain_error(e, DomainError::NotFound))?;
        let request = FamilyCheckInRequest {
            email,
            member_names,
        };

        let payload: MessagePayload = self
            .send_json(Method::POST, "Family check-in", url, &request)
            .await
            .map_err(|e| match to_domain_error(e, DomainError::FamilyNotFound) {
                DomainError::ExternalService(message) => DomainError::CheckInFailed(message),
                other => other,
            })?;

        info!(
            "[family] checked in email={} count={}",
            email,
            member_names.len()
        );
        Ok(payload.message)
    }
}
