//! Unified error system
//!
//! - [`ErrorCode`]: numeric error codes shared with clients
//! - [`ErrorCategory`]: classification of codes by domain
//! - [`AppError`]: error with code, message and details
//! - [`ErrorBody`]: JSON body of a failed request
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Conciergerie errors
//! - 4xxx: Mission errors
//! - 6xxx: Home errors
//! - 8xxx: Employee errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorBody, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::MissionNotFound);
//! let err = AppError::validation("end date must be after start date")
//!     .with_detail("field", "end_date_time");
//! let body = ErrorBody::from(&err);
//! assert_eq!(body.code, 2);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult, ErrorBody};
