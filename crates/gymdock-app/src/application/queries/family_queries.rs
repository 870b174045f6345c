use std::sync::Arc;

use log::info;

use crate::application::dtos::{FamilyMemberDto, FamilyRosterDto};
use gymdock_domain::family::{resolve_from_pending, FamilyRoster};
use gymdock_domain::gateway::FamilyDirectory;
use gymdock_domain::DomainError;

pub struct FamilyQueries {
    families: Arc<dyn FamilyDirectory>,
}

impl FamilyQueries {
    pub fn new(families: Arc<dyn FamilyDirectory>) -> Self {
        Self { families }
    }

    pub async fn get_roster(&self, email: &str) -> Result<FamilyRoster, DomainError> {
        let roster = self.families.roster(email).await?;
        info!(
            "[family] roster email={} total={} active={}",
            roster.email(),
            roster.members().len(),
            roster.active_count()
        );
        Ok(roster)
    }

    pub async fn get_roster_dto(&self, email: &str) -> Result<FamilyRosterDto, DomainError> {
        let roster = self.get_roster(email).await?;
        Ok(to_roster_dto(&roster))
    }

    /// Active members the backend reports as not checked in, roster order.
    pub async fn get_pending(&self, email: &str) -> Result<Vec<String>, DomainError> {
        let roster = self.get_roster(email).await?;
        let pending = self.families.pending_check_ins(roster.email()).await?;
        Ok(resolve_from_pending(&roster, &pending))
    }
}

pub(crate) fn to_roster_dto(roster: &FamilyRoster) -> FamilyRosterDto {
    FamilyRosterDto {
        email: roster.email().to_string(),
        members: roster
            .members()
            .iter()
            .map(|member| FamilyMemberDto {
                id: member.id.to_string(),
                name: member.name.clone(),
                active: member.is_active(),
            })
            .collect(),
        active_names: roster.active_names(),
        is_family: roster.is_family(),
    }
}
