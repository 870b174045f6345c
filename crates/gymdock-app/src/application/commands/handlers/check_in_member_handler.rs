use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::member_commands::*;
use crate::application::dtos::CheckInReceiptDto;
use crate::application::services::SessionService;
use gymdock_domain::gateway::MemberDirectory;
use gymdock_domain::{DomainError, ZoneCalendar};

const WELCOME_BACK_MESSAGE: &str = "Check-in successful! Welcome back.";

/// Single member check-in handler
///
/// An explicit key (tag code or member id) wins over the session member.
pub struct CheckInMemberCommandHandler {
    members: Arc<dyn MemberDirectory>,
    session: Arc<SessionService>,
    calendar: ZoneCalendar,
}

impl CheckInMemberCommandHandler {
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
impl CommandHandler<CheckInMemberCommand> for CheckInMemberCommandHandler {
    type Result = CheckInMemberResult;

    async fn handle(&self, cmd: CheckInMemberCommand) -> Result<Self::Result, DomainError> {
        let explicit = cmd
            .member_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let (key, from_session) = match explicit {
            Some(key) => (key, false),
            None => {
                let session = self.session.current().await?;
                (session.require_member_id()?.to_string(), true)
            }
        };

        info!("[checkin] member key={} from_session={}", key, from_session);

        let receipt = match self.members.check_in(&key).await {
            Ok(receipt) => receipt,
            Err(e) => {
                if from_session {
                    self.session.forget_if_missing(&e).await?;
                }
                return Err(e);
            }
        };

        info!(
            "[checkin] recorded checkin_id={} member_id={}",
            receipt.id, receipt.member_id
        );

        Ok(CheckInMemberResult {
            receipt: CheckInReceiptDto::from_receipt(
                &receipt,
                &self.calendar,
                WELCOME_BACK_MESSAGE,
            ),
        })
    }
}
