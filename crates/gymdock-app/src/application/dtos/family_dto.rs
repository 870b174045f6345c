use gymdock_domain::family::FamilyCheckInState;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyMemberDto {
    pub id: String,
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyRosterDto {
    pub email: String,
    pub members: Vec<FamilyMemberDto>,
    pub active_names: Vec<String>,
    pub is_family: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyStatusDto {
    pub email: String,
    pub period: String, // YYYY-MM-DD
    pub state: FamilyCheckInState,
    pub active_names: Vec<String>,
    pub pending: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyCheckInOutcomeDto {
    pub message: String,
    pub checked_in: Vec<String>,
    pub status: FamilyStatusDto,
}
