use serde::{Deserialize, Serialize};
use uuid::{Uuid, Variant};

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            pub fn from_string(s: &str) -> Self {
                Self(s.to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(MemberId);
define_id!(CheckInId);

impl MemberId {
    /// Parse a member id issued by the backend.
    ///
    /// Only RFC 4122 UUIDs of version 1 through 5 are accepted. Anything else
    /// is rejected before a request is ever built for it.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        if Self::is_valid(trimmed) {
            Ok(Self(trimmed.to_lowercase()))
        } else {
            Err(DomainError::InvalidInput(format!(
                "Invalid member id: {}",
                trimmed
            )))
        }
    }

    pub fn is_valid(s: &str) -> bool {
        // Hyphenated form only
        if s.len() != 36 {
            return false;
        }
        match Uuid::parse_str(s) {
            Ok(uuid) => {
                matches!(uuid.get_version_num(), 1..=5) && uuid.get_variant() == Variant::RFC4122
            }
            Err(_) => false,
        }
    }
}

/// Error codes for structured error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Session (1xxx)
    MissingSession = 1001,
    InvalidMemberId = 1002,

    // Resource Not Found (2xxx)
    MemberNotFound = 2001,
    FamilyNotFound = 2002,
    NotFound = 2003,

    // Business Logic (3xxx)
    CheckInFailed = 3001,
    Conflict = 3002,

    // Data (4xxx)
    DataIntegrityError = 4001,
    SerializationError = 4002,

    // Infrastructure (5xxx)
    InfrastructureError = 5001,
    NetworkError = 5002,
    TimeoutError = 5003,
    ExternalServiceError = 5004,

    // Validation (6xxx)
    ValidationError = 6001,
    InvalidInput = 6002,
}

impl ErrorCode {
    /// Get error code as integer
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ErrorCode::MissingSession
            | ErrorCode::CheckInFailed
            | ErrorCode::Conflict
            | ErrorCode::NetworkError
            | ErrorCode::TimeoutError => ErrorSeverity::Warning,

            ErrorCode::MemberNotFound
            | ErrorCode::FamilyNotFound
            | ErrorCode::NotFound
            | ErrorCode::InvalidMemberId
            | ErrorCode::ValidationError
            | ErrorCode::InvalidInput => ErrorSeverity::Info,

            ErrorCode::DataIntegrityError
            | ErrorCode::SerializationError
            | ErrorCode::InfrastructureError => ErrorSeverity::Error,

            ErrorCode::ExternalServiceError => ErrorSeverity::Warning,
        }
    }

    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ErrorCode::NetworkError
                | ErrorCode::TimeoutError
                | ErrorCode::ExternalServiceError
                | ErrorCode::CheckInFailed
        )
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("No active session: {0}")]
    MissingSession(String),

    #[error("Member not found: {0}")]
    MemberNotFound(String),

    #[error("Family not found: {0}")]
    FamilyNotFound(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Check-in failed: {0}")]
    CheckInFailed(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Backend error: {0}")]
    ExternalService(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl DomainError {
    /// Get error code
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::MissingSession(_) => ErrorCode::MissingSession,
            DomainError::MemberNotFound(_) => ErrorCode::MemberNotFound,
            DomainError::FamilyNotFound(_) => ErrorCode::FamilyNotFound,
            DomainError::NotFound(_) => ErrorCode::NotFound,
            DomainError::CheckInFailed(_) => ErrorCode::CheckInFailed,
            DomainError::Conflict(_) => ErrorCode::Conflict,
            DomainError::Network(_) => ErrorCode::NetworkError,
            DomainError::Timeout(_) => ErrorCode::TimeoutError,
            DomainError::ExternalService(_) => ErrorCode::ExternalServiceError,
            DomainError::Infrastructure(_) => ErrorCode::InfrastructureError,
            DomainError::Validation(_) => ErrorCode::ValidationError,
            DomainError::InvalidInput(_) => ErrorCode::InvalidInput,
            DomainError::DataIntegrity(_) => ErrorCode::DataIntegrityError,
            DomainError::Deserialization(_) => ErrorCode::SerializationError,
        }
    }

    /// Get error message
    pub fn message(&self) -> &str {
        match self {
            DomainError::MissingSession(msg)
            | DomainError::MemberNotFound(msg)
            | DomainError::FamilyNotFound(msg)
            | DomainError::NotFound(msg)
            | DomainError::CheckInFailed(msg)
            | DomainError::Conflict(msg)
            | DomainError::Network(msg)
            | DomainError::Timeout(msg)
            | DomainError::ExternalService(msg)
            | DomainError::Infrastructure(msg)
            | DomainError::Validation(msg)
            | DomainError::InvalidInput(msg)
            | DomainError::DataIntegrity(msg)
            | DomainError::Deserialization(msg) => msg,
        }
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        self.code().severity()
    }

    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        self.code().is_recoverable()
    }

    /// Format error with code
    pub fn format_with_code(&self) -> String {
        format!("[{}] {}", self.code().code(), self)
    }
}
