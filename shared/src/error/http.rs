//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::ConciergerieNotFound
            | Self::MissionNotFound
            | Self::HomeNotFound
            | Self::EmployeeNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::ConciergerieNameExists
            | Self::MissionAlreadyTaken
            | Self::HomeTitleExists
            | Self::HomeHasMissions
            | Self::EmployeeAlreadyExists => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::TokenExpired
            | Self::TokenInvalid
            | Self::NoSession => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied
            | Self::EmployeeRequired
            | Self::ConciergerieRequired
            | Self::NotOwner
            | Self::MissionNotAssigned
            | Self::MissionNotVisible
            | Self::EmployeeNotAccepted => StatusCode::FORBIDDEN,

            // 422 Unprocessable Entity (state conflicts with the request)
            Self::MissionNotEditable
            | Self::MissionInvalidTransition
            | Self::MissionEnded
            | Self::ConciergerieClaimFailed => StatusCode::UNPROCESSABLE_ENTITY,

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError | Self::ConfigError | Self::Unknown => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request
            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::InvalidQueryToken
            | Self::RequiredField
            | Self::MissionInvalidTimeWindow => StatusCode::BAD_REQUEST,
        }
    }
}
