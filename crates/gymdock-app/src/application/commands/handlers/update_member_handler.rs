use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::member_commands::*;
use crate::application::services::SessionService;
use gymdock_domain::gateway::MemberDirectory;
use gymdock_domain::member::MemberProfileUpdate;
use gymdock_domain::{DomainError, MemberId};

/// Update member command handler
pub struct UpdateMemberCommandHandler {
    members: Arc<dyn MemberDirectory>,
    session: Arc<SessionService>,
}

impl UpdateMemberCommandHandler {
    pub fn new(members: Arc<dyn MemberDirectory>, session: Arc<SessionService>) -> Self {
        Self { members, session }
    }
}

#[async_trait]
impl CommandHandler<UpdateMemberCommand> for UpdateMemberCommandHandler {
    type Result = UpdateMemberResult;

    async fn handle(&self, cmd: UpdateMemberCommand) -> Result<Self::Result, DomainError> {
        let member_id = MemberId::parse(&cmd.member_id)?;
        let update = MemberProfileUpdate::new(&cmd.name, &cmd.email)?;

        info!("[member] updating member_id={}", member_id);
        self.members.update_member(&member_id, &update).await?;

        // The kiosk's family lookups key on the email, keep it in step
        let session = self.session.current().await?;
        if session.member_id.as_ref() == Some(&member_id) {
            self.session.remember_email(update.email()).await?;
        }

        Ok(UpdateMemberResult { success: true })
    }
}
