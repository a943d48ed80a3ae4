//! Shared types for the conciergerie mission platform
//!
//! Domain models, the pure mission pipeline (visibility, filtering, sorting,
//! categorisation), calendar and points helpers, and the unified error types
//! used by the server and its clients.

pub mod calendar;
pub mod employee;
pub mod error;
pub mod locale;
pub mod mission;
pub mod models;
pub mod palette;
pub mod points;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use locale::Locale;
pub use mission::{
    AxisFilter, HomeIndex, MissionCategory, MissionFilter, Role, SortDirection, SortField,
    TakenStatus, TemporalStatus, Viewer,
};
