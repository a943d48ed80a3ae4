//! Notification intents
//!
//! Decides who hears about a mission or registration event, from the
//! recipients' notification settings, and records each intent as a
//! structured event on the `notification` log target. Delivery (e-mail) is
//! handled outside this service.

use serde::Serialize;
use shared::models::{Conciergerie, Employee, Mission};
use sqlx::SqlitePool;

use crate::db::repository::{conciergerie, employee};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationEvent {
    MissionAccepted,
    MissionStarted,
    MissionCompleted,
    MissionChanged,
    MissionDeleted,
    MissionRemoved,
    MissionEndedWithoutStart,
    EmployeeRegistered,
}

impl NotificationEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissionAccepted => "mission_accepted",
            Self::MissionStarted => "mission_started",
            Self::MissionCompleted => "mission_completed",
            Self::MissionChanged => "mission_changed",
            Self::MissionDeleted => "mission_deleted",
            Self::MissionRemoved => "mission_removed",
            Self::MissionEndedWithoutStart => "mission_ended_without_start",
            Self::EmployeeRegistered => "employee_registered",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipientKind {
    Conciergerie,
    Employee,
}

/// One message that should go out
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub event: NotificationEvent,
    pub recipient: RecipientKind,
    pub recipient_id: String,
    pub email: String,
    pub mission_id: Option<String>,
    pub employee_id: Option<String>,
}

impl Notification {
    fn to_conciergerie(event: NotificationEvent, c: &Conciergerie) -> Self {
        Self {
            event,
            recipient: RecipientKind::Conciergerie,
            recipient_id: c.id.clone(),
            email: c.email.clone(),
            mission_id: None,
            employee_id: None,
        }
    }

    fn to_employee(event: NotificationEvent, e: &Employee) -> Self {
        Self {
            event,
            recipient: RecipientKind::Employee,
            recipient_id: e.id.clone(),
            email: e.email.clone(),
            mission_id: None,
            employee_id: Some(e.id.clone()),
        }
    }

    fn about(mut self, mission: &Mission) -> Self {
        self.mission_id = Some(mission.id.clone());
        self
    }
}

/// Who should hear about `event` on `mission`
///
/// `owner` is the mission's conciergerie, `employee` the employee concerned
/// (the assignee, or the one just removed).
pub fn mission_notifications(
    event: NotificationEvent,
    mission: &Mission,
    owner: Option<&Conciergerie>,
    employee: Option<&Employee>,
) -> Vec<Notification> {
    let mut out = Vec::new();

    let owner_wants = owner.filter(|c| {
        let s = &c.notification_settings;
        match event {
            NotificationEvent::MissionAccepted => s.accepted_missions,
            NotificationEvent::MissionStarted => s.started_missions,
            NotificationEvent::MissionCompleted => s.completed_missions,
            NotificationEvent::MissionEndedWithoutStart => s.missions_ended_without_start,
            _ => false,
        }
    });
    if let Some(c) = owner_wants {
        let mut n = Notification::to_conciergerie(event, c).about(mission);
        n.employee_id = employee.map(|e| e.id.clone());
        out.push(n);
    }

    let employee_wants = employee.filter(|e| {
        let s = &e.notification_settings;
        match event {
            NotificationEvent::MissionAccepted => s.accepted_missions,
            NotificationEvent::MissionChanged => s.mission_changed,
            NotificationEvent::MissionDeleted => s.mission_deleted,
            NotificationEvent::MissionRemoved => s.mission_removed,
            _ => false,
        }
    });
    if let Some(e) = employee_wants {
        out.push(Notification::to_employee(event, e).about(mission));
    }

    out
}

/// New registration: the conciergerie the employee asked to join
pub fn registration_notifications(
    employee: &Employee,
    target: Option<&Conciergerie>,
) -> Vec<Notification> {
    target
        .filter(|c| c.notification_settings.employee_registrations)
        .map(|c| {
            let mut n = Notification::to_conciergerie(NotificationEvent::EmployeeRegistered, c);
            n.employee_id = Some(employee.id.clone());
            vec![n]
        })
        .unwrap_or_default()
}

/// Missions that became late during `(since_ms, now_ms]`
///
/// Late means assigned, still pending and already over; each mission is
/// picked up once, by the run whose window contains its end.
pub fn newly_late<'a>(missions: &'a [Mission], since_ms: i64, now_ms: i64) -> Vec<&'a Mission> {
    missions
        .iter()
        .filter(|m| !m.deleted && m.is_late_at(now_ms))
        .filter(|m| m.end_date_time >= since_ms && m.end_date_time < now_ms)
        .collect()
}

pub fn emit(notifications: &[Notification]) {
    for n in notifications {
        tracing::info!(
            target: "notification",
            event = n.event.as_str(),
            recipient = ?n.recipient,
            recipient_id = %n.recipient_id,
            email = %n.email,
            mission_id = n.mission_id.as_deref().unwrap_or(""),
            employee_id = n.employee_id.as_deref().unwrap_or(""),
            "notification queued"
        );
    }
}

/// Load the recipients of a mission event and emit the intents
///
/// Lookup failures are logged; a notification never fails the request.
pub async fn notify_mission(
    pool: &SqlitePool,
    event: NotificationEvent,
    mission: &Mission,
    employee_id: Option<&str>,
) -> Vec<Notification> {
    let owner = match conciergerie::find_by_name(pool, &mission.conciergerie_name).await {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(error = %e, mission_id = %mission.id, "Failed to load conciergerie for notification");
            None
        }
    };
    let employee = match employee_id {
        Some(id) => employee::find_by_id(pool, id).await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, employee_id = %id, "Failed to load employee for notification");
            None
        }),
        None => None,
    };

    let notifications = mission_notifications(event, mission, owner.as_ref(), employee.as_ref());
    emit(&notifications);
    notifications
}

pub async fn notify_registration(pool: &SqlitePool, employee: &Employee) -> Vec<Notification> {
    let target = match employee.conciergerie_name.as_deref() {
        Some(name) => conciergerie::find_by_name(pool, name).await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load conciergerie for registration notice");
            None
        }),
        None => None,
    };
    let notifications = registration_notifications(employee, target.as_ref());
    emit(&notifications);
    notifications
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{
        ConciergerieNotificationSettings, EmployeeNotificationSettings, EmployeeStatus,
        MissionStatus,
    };

    const HOUR: i64 = 3_600_000;

    fn owner(settings: ConciergerieNotificationSettings) -> Conciergerie {
        Conciergerie {
            id: "c1".into(),
            name: "Azur".into(),
            email: "azur@example.com".into(),
            tel: None,
            color_name: "Bleu".into(),
            color: String::new(),
            notification_settings: settings,
        }
    }

    fn worker(settings: EmployeeNotificationSettings) -> Employee {
        Employee {
            id: "e1".into(),
            first_name: "Marie".into(),
            family_name: "Curie".into(),
            tel: "0600000000".into(),
            email: "marie@example.com".into(),
            geographic_zone: "Nice".into(),
            message: None,
            conciergerie_name: Some("Azur".into()),
            status: EmployeeStatus::Accepted,
            created_at: 0,
            notification_settings: settings,
        }
    }

    fn mission(end: i64, employee: Option<&str>) -> Mission {
        Mission {
            id: "m1".into(),
            home_id: "h1".into(),
            objectives: vec![],
            start_date_time: end - 2 * HOUR,
            end_date_time: end,
            employee_id: employee.map(String::from),
            allowed_employees: vec![],
            status: MissionStatus::Pending,
            hours: 0.0,
            conciergerie_name: "Azur".into(),
            modified_date: 0,
            deleted: false,
        }
    }

    #[test]
    fn test_accepted_goes_to_both_sides() {
        let c = owner(Default::default());
        let e = worker(Default::default());
        let out = mission_notifications(
            NotificationEvent::MissionAccepted,
            &mission(HOUR, Some("e1")),
            Some(&c),
            Some(&e),
        );
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].recipient, RecipientKind::Conciergerie);
        assert_eq!(out[0].employee_id.as_deref(), Some("e1"));
        assert_eq!(out[1].email, "marie@example.com");
        assert_eq!(out[1].mission_id.as_deref(), Some("m1"));
    }

    #[test]
    fn test_settings_mute_recipients() {
        let c = owner(ConciergerieNotificationSettings {
            started_missions: false,
            ..Default::default()
        });
        let out = mission_notifications(
            NotificationEvent::MissionStarted,
            &mission(HOUR, Some("e1")),
            Some(&c),
            None,
        );
        assert!(out.is_empty());

        let e = worker(EmployeeNotificationSettings {
            mission_removed: false,
            ..Default::default()
        });
        let out = mission_notifications(
            NotificationEvent::MissionRemoved,
            &mission(HOUR, None),
            Some(&c),
            Some(&e),
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_changes_only_reach_the_employee() {
        let c = owner(Default::default());
        let e = worker(Default::default());
        let out = mission_notifications(
            NotificationEvent::MissionChanged,
            &mission(HOUR, Some("e1")),
            Some(&c),
            Some(&e),
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].recipient, RecipientKind::Employee);
    }

    #[test]
    fn test_registration() {
        let e = worker(Default::default());
        assert_eq!(
            registration_notifications(&e, Some(&owner(Default::default()))).len(),
            1
        );
        let muted = owner(ConciergerieNotificationSettings {
            employee_registrations: false,
            ..Default::default()
        });
        assert!(registration_notifications(&e, Some(&muted)).is_empty());
        assert!(registration_notifications(&e, None).is_empty());
    }

    #[test]
    fn test_newly_late_window() {
        let now = 100 * HOUR;
        let missions = vec![
            mission(now - HOUR / 2, Some("e1")),  // ended in window, late
            mission(now - 3 * HOUR, Some("e1")),  // ended before the window
            mission(now - HOUR / 2, None),        // nobody took it
            mission(now + HOUR, Some("e1")),      // not over yet
        ];
        let late = newly_late(&missions, now - HOUR, now);
        assert_eq!(late.len(), 1);
        assert_eq!(late[0].end_date_time, now - HOUR / 2);
    }
}
