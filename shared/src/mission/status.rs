//! Mission lifecycle transitions

use crate::models::{Mission, MissionStatus};

impl MissionStatus {
    /// `pending → started → completed`; no other move is allowed
    pub fn can_transition_to(&self, next: MissionStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Started) | (Self::Started, Self::Completed)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Started => "started",
            Self::Completed => "completed",
        }
    }
}

impl Mission {
    /// Only the assigned employee moves a mission forward
    pub fn is_assigned_to(&self, employee_id: &str) -> bool {
        self.employee_id.as_deref() == Some(employee_id)
    }

    /// An employee may accept a pending, untaken, current mission they can see
    pub fn can_be_accepted_by(&self, employee_id: &str, now_ms: i64) -> bool {
        !self.deleted
            && !self.is_taken()
            && self.status == MissionStatus::Pending
            && self.is_current_at(now_ms)
            && self.is_visible_to_employee(employee_id)
    }
}
