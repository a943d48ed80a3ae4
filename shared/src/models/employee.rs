//! Employee Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::notification::EmployeeNotificationSettings;

/// Approval workflow status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum EmployeeStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl EmployeeStatus {
    /// Display order in lists: pending first, then accepted, then rejected
    pub fn rank(&self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Accepted => 1,
            Self::Rejected => 2,
        }
    }
}

/// Employee entity (field worker)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: String,
    pub first_name: String,
    pub family_name: String,
    pub tel: String,
    pub email: String,
    pub geographic_zone: String,
    /// Free-form message sent with the registration request
    pub message: Option<String>,
    /// Conciergerie the employee asked to join
    pub conciergerie_name: Option<String>,
    #[serde(default)]
    pub status: EmployeeStatus,
    pub created_at: i64,
    #[serde(default)]
    #[cfg_attr(feature = "db", sqlx(json))]
    pub notification_settings: EmployeeNotificationSettings,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.family_name)
    }

    pub fn is_accepted(&self) -> bool {
        self.status == EmployeeStatus::Accepted
    }
}

/// Registration payload
///
/// The id is chosen by the client (it doubles as the user id of the session).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmployeeCreate {
    #[validate(length(min = 1, message = "id is required"))]
    pub id: String,
    #[validate(length(min = 1, message = "first name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "family name is required"))]
    pub family_name: String,
    #[validate(length(min = 6, message = "phone number is too short"))]
    pub tel: String,
    #[validate(email(message = "invalid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "geographic zone is required"))]
    pub geographic_zone: String,
    pub message: Option<String>,
    pub conciergerie_name: Option<String>,
    pub notification_settings: Option<EmployeeNotificationSettings>,
}

/// Settings update payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct EmployeeUpdate {
    #[validate(length(min = 6))]
    pub tel: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1))]
    pub geographic_zone: Option<String>,
    pub message: Option<String>,
    pub conciergerie_name: Option<String>,
    pub notification_settings: Option<EmployeeNotificationSettings>,
}

/// Approval decision payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeStatusUpdate {
    pub status: EmployeeStatus,
}

/// Registration outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRegistration {
    pub employee: Option<Employee>,
    pub already_exists: bool,
}
