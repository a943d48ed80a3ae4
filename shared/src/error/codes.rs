//! Error codes shared by the server and its clients
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Conciergerie errors
//! - 4xxx: Mission errors
//! - 6xxx: Home errors
//! - 8xxx: Employee errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Serialized as its u16 value so that clients can switch on numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Unknown filter, sort or grouping token in a query
    InvalidQueryToken = 6,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// The user id matches no conciergerie and no accepted employee
    NoSession = 1008,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Only employees may do this
    EmployeeRequired = 2002,
    /// Only conciergeries may do this
    ConciergerieRequired = 2003,
    /// The resource belongs to another conciergerie
    NotOwner = 2004,

    // ==================== 3xxx: Conciergerie ====================
    /// Conciergerie not found
    ConciergerieNotFound = 3001,
    /// A conciergerie with this name already exists
    ConciergerieNameExists = 3002,
    /// The conciergerie could not be re-keyed to the session user
    ConciergerieClaimFailed = 3003,

    // ==================== 4xxx: Mission ====================
    /// Mission not found
    MissionNotFound = 4001,
    /// Mission already accepted by an employee
    MissionAlreadyTaken = 4002,
    /// Mission has ended or has been started
    MissionNotEditable = 4003,
    /// Status change outside pending → started → completed
    MissionInvalidTransition = 4004,
    /// The employee is not assigned to the mission
    MissionNotAssigned = 4005,
    /// The employee is not on the mission's allow-list
    MissionNotVisible = 4006,
    /// End before start, or shorter than one hour
    MissionInvalidTimeWindow = 4007,
    /// Mission is already over
    MissionEnded = 4008,

    // ==================== 6xxx: Home ====================
    /// Home not found
    HomeNotFound = 6001,
    /// A home with this title already exists
    HomeTitleExists = 6002,
    /// Home still has live missions
    HomeHasMissions = 6003,

    // ==================== 8xxx: Employee ====================
    /// Employee not found
    EmployeeNotFound = 8001,
    /// Same name, phone or e-mail already registered
    EmployeeAlreadyExists = 8002,
    /// Employee has not been accepted by a conciergerie
    EmployeeNotAccepted = 8003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidQueryToken => "Unknown query token",
            ErrorCode::RequiredField => "Required field is missing",

            // Auth
            ErrorCode::NotAuthenticated => "Authentication required",
            ErrorCode::TokenExpired => "Token has expired",
            ErrorCode::TokenInvalid => "Token is invalid",
            ErrorCode::NoSession => "No conciergerie or accepted employee for this user",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::EmployeeRequired => "Employee session required",
            ErrorCode::ConciergerieRequired => "Conciergerie session required",
            ErrorCode::NotOwner => "Resource belongs to another conciergerie",

            // Conciergerie
            ErrorCode::ConciergerieNotFound => "Conciergerie not found",
            ErrorCode::ConciergerieNameExists => "Conciergerie name already exists",
            ErrorCode::ConciergerieClaimFailed => "Conciergerie could not be claimed",

            // Mission
            ErrorCode::MissionNotFound => "Mission not found",
            ErrorCode::MissionAlreadyTaken => "Mission already taken",
            ErrorCode::MissionNotEditable => "Mission can no longer be edited",
            ErrorCode::MissionInvalidTransition => "Invalid mission status transition",
            ErrorCode::MissionNotAssigned => "Mission is not assigned to this employee",
            ErrorCode::MissionNotVisible => "Mission is restricted to other employees",
            ErrorCode::MissionInvalidTimeWindow => "Invalid mission time window",
            ErrorCode::MissionEnded => "Mission has already ended",

            // Home
            ErrorCode::HomeNotFound => "Home not found",
            ErrorCode::HomeTitleExists => "Home title already exists",
            ErrorCode::HomeHasMissions => "Home still has missions",

            // Employee
            ErrorCode::EmployeeNotFound => "Employee not found",
            ErrorCode::EmployeeAlreadyExists => "Employee already registered",
            ErrorCode::EmployeeNotAccepted => "Employee has not been accepted",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidQueryToken),
            7 => Ok(ErrorCode::RequiredField),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1008 => Ok(ErrorCode::NoSession),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::EmployeeRequired),
            2003 => Ok(ErrorCode::ConciergerieRequired),
            2004 => Ok(ErrorCode::NotOwner),

            // Conciergerie
            3001 => Ok(ErrorCode::ConciergerieNotFound),
            3002 => Ok(ErrorCode::ConciergerieNameExists),
            3003 => Ok(ErrorCode::ConciergerieClaimFailed),

            // Mission
            4001 => Ok(ErrorCode::MissionNotFound),
            4002 => Ok(ErrorCode::MissionAlreadyTaken),
            4003 => Ok(ErrorCode::MissionNotEditable),
            4004 => Ok(ErrorCode::MissionInvalidTransition),
            4005 => Ok(ErrorCode::MissionNotAssigned),
            4006 => Ok(ErrorCode::MissionNotVisible),
            4007 => Ok(ErrorCode::MissionInvalidTimeWindow),
            4008 => Ok(ErrorCode::MissionEnded),

            // Home
            6001 => Ok(ErrorCode::HomeNotFound),
            6002 => Ok(ErrorCode::HomeTitleExists),
            6003 => Ok(ErrorCode::HomeHasMissions),

            // Employee
            8001 => Ok(ErrorCode::EmployeeNotFound),
            8002 => Ok(ErrorCode::EmployeeAlreadyExists),
            8003 => Ok(ErrorCode::EmployeeNotAccepted),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
