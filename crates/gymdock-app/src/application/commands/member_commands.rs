use crate::application::commands::command_handler::Command;
use crate::application::dtos::{CheckInReceiptDto, MemberProfileDto};

/// Register a new member from the kiosk form and check them in
#[derive(Debug, Clone)]
pub struct RegisterMemberCommand {
    /// Code read from the member's NFC/QR tag
    pub member_code: String,
    pub name: String,
}

impl Command for RegisterMemberCommand {}

#[derive(Debug, Clone)]
pub struct RegisterMemberResult {
    pub member: MemberProfileDto,
    pub receipt: CheckInReceiptDto,
}

/// Check a single member in
#[derive(Debug, Clone, Default)]
pub struct CheckInMemberCommand {
    /// Falls back to the session's member when `None`
    pub member_key: Option<String>,
}

impl Command for CheckInMemberCommand {}

#[derive(Debug, Clone)]
pub struct CheckInMemberResult {
    pub receipt: CheckInReceiptDto,
}

/// Edit a member's name and email
#[derive(Debug, Clone)]
pub struct UpdateMemberCommand {
    pub member_id: String,
    pub name: String,
    pub email: String,
}

impl Command for UpdateMemberCommand {}

#[derive(Debug, Clone)]
pub struct UpdateMemberResult {
    pub success: bool,
}
