use crate::models::Mission;

use super::viewer::Viewer;
use super::visibility::visible_missions;

/// Missions listed on the missions page
///
/// Live (not deleted) missions that have not ended, visible to the viewer,
/// ordered by start. Employees only see missions nobody has taken yet.
pub fn active_missions<'a, I>(missions: I, viewer: &Viewer, now_ms: i64) -> Vec<&'a Mission>
where
    I: IntoIterator<Item = &'a Mission>,
{
    let live = missions
        .into_iter()
        .filter(|m| !m.deleted && m.is_current_at(now_ms));

    let mut feed: Vec<&Mission> = visible_missions(live, viewer)
        .into_iter()
        .filter(|m| viewer.is_conciergerie() || !m.is_taken())
        .collect();
    feed.sort_by_key(|m| m.start_date_time);
    feed
}
