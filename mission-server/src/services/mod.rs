//! 后台服务
//!
//! - [`notifier`] - 通知意图 (谁应该收到什么)
//! - [`spawn_late_mission_watch`] - 定时检查已结束但未开始的任务

pub mod notifier;

use std::time::Duration;

use shared::util::now_millis;

use crate::core::ServerState;
use crate::db::repository::{conciergerie, mission};
use notifier::{NotificationEvent, mission_notifications};

/// How often the late-mission check runs
pub const LATE_MISSION_INTERVAL: Duration = Duration::from_secs(15 * 60);

/// One pass of the late-mission check over `(since_ms, now_ms]`
pub async fn check_late_missions(state: &ServerState, since_ms: i64, now_ms: i64) -> usize {
    let missions = match mission::find_all(&state.pool).await {
        Ok(m) => m,
        Err(e) => {
            tracing::error!(error = %e, "Late mission check failed to load missions");
            return 0;
        }
    };

    let mut sent = 0;
    for m in notifier::newly_late(&missions, since_ms, now_ms) {
        let owner = conciergerie::find_by_name(&state.pool, &m.conciergerie_name)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, mission_id = %m.id, "Failed to load conciergerie");
                None
            });
        let notifications = mission_notifications(
            NotificationEvent::MissionEndedWithoutStart,
            m,
            owner.as_ref(),
            None,
        );
        notifier::emit(&notifications);
        sent += notifications.len();
    }
    sent
}

/// Run [`check_late_missions`] every [`LATE_MISSION_INTERVAL`]
pub fn spawn_late_mission_watch(state: ServerState) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(LATE_MISSION_INTERVAL);
        let mut since = now_millis();
        loop {
            interval.tick().await;
            let now = now_millis();
            let sent = check_late_missions(&state, since, now).await;
            if sent > 0 {
                tracing::info!(sent, "Late mission notifications queued");
            }
            since = now;
        }
    })
}
