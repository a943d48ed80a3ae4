//! Mission Model

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::util::null_as_default;

/// Minimum mission duration accepted at entry (1 hour)
pub const MIN_MISSION_DURATION_MS: i64 = 60 * 60 * 1000;

/// Mission lifecycle status
///
/// Absent or `null` in JSON is read as [`MissionStatus::Pending`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum MissionStatus {
    #[default]
    Pending,
    Started,
    Completed,
}

/// Mission entity (a scheduled task instance against a Home)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Mission {
    pub id: String,
    pub home_id: String,
    /// Objective / task labels
    #[serde(default, deserialize_with = "null_as_default")]
    #[cfg_attr(feature = "db", sqlx(json))]
    pub objectives: Vec<String>,
    pub start_date_time: i64,
    pub end_date_time: i64,
    /// Assigned employee (must be an accepted employee)
    pub employee_id: Option<String>,
    /// Employees allowed to see the mission; empty means everyone
    #[serde(default, deserialize_with = "null_as_default")]
    #[cfg_attr(feature = "db", sqlx(json))]
    pub allowed_employees: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: MissionStatus,
    /// Estimated hours, derived from objectives and home specifications
    #[serde(default)]
    pub hours: f64,
    pub conciergerie_name: String,
    pub modified_date: i64,
    #[serde(default)]
    pub deleted: bool,
}

impl Mission {
    /// An employee has accepted the mission
    pub fn is_taken(&self) -> bool {
        self.employee_id.is_some()
    }

    /// `end >= now`
    pub fn is_current_at(&self, now_ms: i64) -> bool {
        self.end_date_time >= now_ms
    }

    /// `end < now`
    pub fn is_archived_at(&self, now_ms: i64) -> bool {
        self.end_date_time < now_ms
    }

    /// Accepted, never started, and already over
    pub fn is_late_at(&self, now_ms: i64) -> bool {
        self.is_taken() && self.status == MissionStatus::Pending && self.is_archived_at(now_ms)
    }

    /// Missions can be edited until they end or get started
    pub fn is_editable_at(&self, now_ms: i64) -> bool {
        !self.is_archived_at(now_ms) && self.status == MissionStatus::Pending
    }

    pub fn is_visible_to_employee(&self, employee_id: &str) -> bool {
        self.allowed_employees.is_empty() || self.allowed_employees.iter().any(|e| e == employee_id)
    }
}

/// Create mission payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_create_window"))]
pub struct MissionCreate {
    #[validate(length(min = 1, message = "home is required"))]
    pub home_id: String,
    #[validate(length(min = 1, message = "at least one objective is required"))]
    pub objectives: Vec<String>,
    pub start_date_time: i64,
    pub end_date_time: i64,
    #[serde(default)]
    pub allowed_employees: Vec<String>,
}

/// Update mission payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct MissionUpdate {
    #[validate(length(min = 1))]
    pub home_id: Option<String>,
    #[validate(length(min = 1))]
    pub objectives: Option<Vec<String>>,
    pub start_date_time: Option<i64>,
    pub end_date_time: Option<i64>,
    pub allowed_employees: Option<Vec<String>>,
}

/// Check the start/end pair of a mission time window
///
/// End must be strictly after start, with at least one hour between them.
pub fn check_time_window(start_ms: i64, end_ms: i64) -> Result<(), ValidationError> {
    if end_ms <= start_ms {
        return Err(ValidationError::new("end_before_start")
            .with_message("end date must be after start date".into()));
    }
    if end_ms - start_ms < MIN_MISSION_DURATION_MS {
        return Err(ValidationError::new("too_short")
            .with_message("a mission lasts at least one hour".into()));
    }
    Ok(())
}

fn validate_create_window(data: &MissionCreate) -> Result<(), ValidationError> {
    check_time_window(data.start_date_time, data.end_date_time)
}
