use crate::application::commands::command_handler::Command;
use crate::application::dtos::FamilyCheckInOutcomeDto;

/// Check in the selected members of a family
#[derive(Debug, Clone)]
pub struct FamilyCheckInCommand {
    /// Falls back to the session's family email when `None`
    pub email: Option<String>,
    pub member_names: Vec<String>,
}

impl Command for FamilyCheckInCommand {}

#[derive(Debug, Clone)]
pub struct FamilyCheckInResult {
    pub outcome: FamilyCheckInOutcomeDto,
}
