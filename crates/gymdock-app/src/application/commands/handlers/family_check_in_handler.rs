use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::family_commands::*;
use crate::application::services::{FamilyCheckInService, SessionService};
use gymdock_domain::DomainError;

/// Family check-in command handler
pub struct FamilyCheckInCommandHandler {
    family_check_in: Arc<FamilyCheckInService>,
    session: Arc<SessionService>,
}

impl FamilyCheckInCommandHandler {
    pub fn new(family_check_in: Arc<FamilyCheckInService>, session: Arc<SessionService>) -> Self {
        Self {
            family_check_in,
            session,
        }
    }
}

#[async_trait]
impl CommandHandler<FamilyCheckInCommand> for FamilyCheckInCommandHandler {
    type Result = FamilyCheckInResult;

    async fn handle(&self, cmd: FamilyCheckInCommand) -> Result<Self::Result, DomainError> {
        let (email, from_session) = match cmd.email.filter(|email| !email.trim().is_empty()) {
            Some(email) => (email, false),
            None => {
                let session = self.session.current().await?;
                (session.require_email()?.to_string(), true)
            }
        };

        info!(
            "[family] check-in email={} selected={}",
            email,
            cmd.member_names.len()
        );

        let outcome = match self.family_check_in.submit(&email, &cmd.member_names).await {
            Ok(outcome) => outcome,
            Err(e) => {
                if from_session {
                    self.session.forget_if_missing(&e).await?;
                }
                return Err(e);
            }
        };

        info!(
            "[family] checked in email={} names={:?} pending={}",
            outcome.status.email,
            outcome.checked_in,
            outcome.status.pending.len()
        );

        Ok(FamilyCheckInResult { outcome })
    }
}
