mod check_in_member_handler;
mod family_check_in_handler;
mod register_member_handler;
mod update_member_handler;

#[cfg(test)]
mod tests;

pub use check_in_member_handler::CheckInMemberCommandHandler;
pub use family_check_in_handler::FamilyCheckInCommandHandler;
pub use register_member_handler::RegisterMemberCommandHandler;
pub use update_member_handler::UpdateMemberCommandHandler;
