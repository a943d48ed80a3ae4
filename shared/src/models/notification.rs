//! Notification preferences
//!
//! Stored as JSON columns on the owning row. Every flag defaults to `true`,
//! so rows written before a flag existed keep receiving that notification.

use serde::{Deserialize, Serialize};

fn yes() -> bool {
    true
}

/// What a conciergerie wants to hear about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConciergerieNotificationSettings {
    /// An employee accepted one of our missions
    #[serde(default = "yes")]
    pub accepted_missions: bool,
    #[serde(default = "yes")]
    pub started_missions: bool,
    #[serde(default = "yes")]
    pub completed_missions: bool,
    /// An accepted mission ended without being started
    #[serde(default = "yes")]
    pub missions_ended_without_start: bool,
    /// A new employee asked to join
    #[serde(default = "yes")]
    pub employee_registrations: bool,
}

impl Default for ConciergerieNotificationSettings {
    fn default() -> Self {
        Self {
            accepted_missions: true,
            started_missions: true,
            completed_missions: true,
            missions_ended_without_start: true,
            employee_registrations: true,
        }
    }
}

/// What an employee wants to hear about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeNotificationSettings {
    /// Confirmation when they accept a mission
    #[serde(default = "yes")]
    pub accepted_missions: bool,
    /// One of their missions was edited
    #[serde(default = "yes")]
    pub mission_changed: bool,
    /// One of their missions was deleted
    #[serde(default = "yes")]
    pub mission_deleted: bool,
    /// They were removed from a mission
    #[serde(default = "yes")]
    pub mission_removed: bool,
}

impl Default for EmployeeNotificationSettings {
    fn default() -> Self {
        Self {
            accepted_missions: true,
            mission_changed: true,
            mission_deleted: true,
            mission_removed: true,
        }
    }
}
