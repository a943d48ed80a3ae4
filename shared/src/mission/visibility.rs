use crate::models::Mission;

use super::viewer::{Role, Viewer};

/// Missions the viewer may see at all
///
/// - Employee: missions with an empty allow-list, or whose allow-list contains
///   the viewer's id. Without a resolvable employee id nothing is visible.
/// - Conciergerie: everything; narrowing by conciergerie happens in
///   [`MissionFilter`](super::MissionFilter).
pub fn visible_missions<'a, I>(missions: I, viewer: &Viewer) -> Vec<&'a Mission>
where
    I: IntoIterator<Item = &'a Mission>,
{
    match viewer.role {
        Role::Conciergerie => missions.into_iter().collect(),
        Role::Employee => match viewer.employee_id() {
            Some(employee_id) => missions
                .into_iter()
                .filter(|m| m.is_visible_to_employee(employee_id))
                .collect(),
            None => Vec::new(),
        },
    }
}
