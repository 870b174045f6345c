use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::member_commands::*;
use crate::application::dtos::{CheckInReceiptDto, MemberProfileDto};
use crate::application::services::SessionService;
use gymdock_domain::gateway::MemberDirectory;
use gymdock_domain::member::NewMember;
use gymdock_domain::{DomainError, MemberId, ZoneCalendar};

const WELCOME_MESSAGE: &str = "Check-in successful! Welcome!";

/// Register member command handler
pub struct RegisterMemberCommandHandler {
    members: Arc<dyn MemberDirectory>,
    session: Arc<SessionService>,
    calendar: ZoneCalendar,
}

impl RegisterMemberCommandHandler {
    pub fn new(
        members: Arc<dyn MemberDirectory>,
        session: Arc<SessionService>,
        calendar: ZoneCalendar,
    ) -> Self {
        Self {
            members,
            session,
            calendar,
        }
    }
}

#[async_trait]
impl CommandHandler<RegisterMemberCommand> for RegisterMemberCommandHandler {
    type Result = RegisterMemberResult;

    async fn handle(&self, cmd: RegisterMemberCommand) -> Result<Self::Result, DomainError> {
        let new_member = NewMember::new(&cmd.member_code, &cmd.name)?;
        info!(
            "[member] registering member_code={}",
            new_member.member_code()
        );

        // 1. Create the member
        let profile = self.members.register_member(&new_member).await?;

        // 2. First visit counts as a check-in
        let receipt = self.members.check_in(&profile.member_code).await?;

        // 3. Remember who is at the kiosk
        if MemberId::is_valid(profile.id.as_str()) {
            self.session.remember_member(profile.id.clone()).await?;
        } else {
            warn!(
                "[member] backend returned malformed id, session not updated id={}",
                profile.id
            );
        }

        info!("[member] registered id={} name={}", profile.id, profile.name);

        Ok(RegisterMemberResult {
            receipt: CheckInReceiptDto::from_receipt(&receipt, &self.calendar, WELCOME_MESSAGE),
            member: MemberProfileDto::from(profile),
        })
    }
}
