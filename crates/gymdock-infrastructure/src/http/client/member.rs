use async_trait::async_trait;
use gymdock_domain::attendance::MemberStatsSnapshot;
use gymdock_domain::gateway::MemberDirectory;
use gymdock_domain::member::{CheckInReceipt, MemberProfile, MemberProfileUpdate, NewMember};
use gymdock_domain::{DomainError, MemberId};
use log::info;
use reqwest::Method;

use super::error::to_domain_error;
use super::types::{
    CheckInPayload, CheckInRequest, MemberPayload, MemberStatsPayload, MemberUpdateRequest,
    NewMemberRequest,
};
use super::HttpBackend;

fn ensure_valid(id: &MemberId) -> Result<(), DomainError> {
    if MemberId::is_valid(id.as_str()) {
        Ok(())
    } else {
        Err(DomainError::InvalidInput(format!("Invalid member id: {}", id)))
    }
}

#[async_trait]
impl MemberDirectory for HttpBackend {
    async fn find_member(&self, id: &MemberId) -> Result<Option<MemberProfile>, DomainError> {
        ensure_valid(id)?;
        let url = self
            .endpoint(&["member", id.as_str()])
            .map_err(|e| to_domain_error(e, DomainError::NotFound))?;

        match self.get_json::<MemberPayload>("Find member", url).await {
            Ok(payload) => Ok(Some(payload.into())),
            Err(e) => match to_domain_error(e, DomainError::MemberNotFound) {
                DomainError::MemberNotFound(_) => Ok(None),
                other => Err(other),
            },
        }
    }

    async fn register_member(&self, member: &NewMember) -> Result<MemberProfile, DomainError> {
        let url = self
            .endpoint(&["member"])
            .map_err(|e| to_domain_error(e, DomainError::NotFound))?;
        let request = NewMemberRequest {
            member_id: member.member_code(),
            name: member.name(),
            active: member.active(),
        };

        let payload: MemberPayload = self
            .send_json(Method::POST, "Register member", url, &request)
            .await
            .map_err(|e| to_domain_error(e, DomainError::NotFound))?;

        info!(
            "[member] registered member_code={} id={}",
            payload.member_id, payload.id
        );
        Ok(payload.into())
    }

    async fn update_member(
        &self,
        id: &MemberId,
        update: &MemberProfileUpdate,
    ) -> Result<(), DomainError> {
        ensure_valid(id)?;
        let url = self
            .endpoint(&["member", id.as_str()])
            .map_err(|e| to_domain_error(e, DomainError::NotFound))?;
        let request = MemberUpdateRequest {
            name: update.name(),
            email: update.email(),
        };

        self.send_json::<_, serde_json::Value>(Method::PUT, "Update member", url, &request)
            .await
            .map_err(|e| to_domain_error(e, DomainError::MemberNotFound))?;
        Ok(())
    }

    async fn check_in(&self, member_key: &str) -> Result<CheckInReceipt, DomainError> {
        let member_key = member_key.trim();
        if member_key.is_empty() {
            return Err(DomainError::Validation("Member id cannot be empty".to_string()));
        }

        let url = self
            .endpoint(&["checkin"])
            .map_err(|e| to_domain_error(e, DomainError::NotFound))?;
        let payload: CheckInPayload = self
            .send_json(
                Method::POST,
                "Check in",
                url,
                &CheckInRequest {
                    member_id: member_key,
                },
            )
            .await
            .map_err(|e| match to_domain_error(e, DomainError::MemberNotFound) {
                DomainError::ExternalService(message) => DomainError::CheckInFailed(message),
                other => other,
            })?;

        CheckInReceipt::try_from(payload)
    }

    async fn member_stats(&self, id: &MemberId) -> Result<MemberStatsSnapshot, DomainError> {
        ensure_valid(id)?;
        let url = self
            .endpoint(&["member", id.as_str(), "stats"])
            .map_err(|e| to_domain_error(e, DomainError::NotFound))?;

        let payload: MemberStatsPayload = self
            .get_json("Member stats", url)
            .await
            .map_err(|e| to_domain_error(e, DomainError::MemberNotFound))?;

        Ok(payload.into_snapshot(id))
    }
}
