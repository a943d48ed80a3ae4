//! Mission lifecycle handlers
//!
//! `pending → started → completed`, plus accept and remove-employee.
//! The checks below only pick the error code; the repository write is
//! conditional, so a lost race still fails cleanly.

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Mission, MissionStatus};
use shared::util::now_millis;

use super::load_live;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{employee, mission};
use crate::services::notifier::{self, NotificationEvent};
use crate::utils::{AppError, AppResult, ErrorCode};

/// POST /api/missions/:id/accept - 员工接单
pub async fn accept(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Mission>> {
    let employee_id = user.require_employee()?;
    if employee::find_accepted_by_id(&state.pool, employee_id)
        .await?
        .is_none()
    {
        return Err(AppError::new(ErrorCode::EmployeeNotAccepted));
    }

    let m = load_live(&state, &id).await?;
    if !m.is_visible_to_employee(employee_id) {
        return Err(AppError::new(ErrorCode::MissionNotVisible));
    }
    if m.is_taken() {
        return Err(AppError::new(ErrorCode::MissionAlreadyTaken));
    }
    if m.is_archived_at(now_millis()) {
        return Err(AppError::new(ErrorCode::MissionEnded));
    }
    if m.status != MissionStatus::Pending {
        return Err(AppError::new(ErrorCode::MissionInvalidTransition));
    }

    if !mission::accept(&state.pool, &id, employee_id).await? {
        return Err(AppError::new(ErrorCode::MissionAlreadyTaken));
    }

    let m = load_live(&state, &id).await?;
    tracing::info!(mission_id = %id, employee_id = %employee_id, "Mission accepted");
    notifier::notify_mission(
        &state.pool,
        NotificationEvent::MissionAccepted,
        &m,
        Some(employee_id),
    )
    .await;
    Ok(Json(m))
}

/// Move the caller's mission forward to `to`
async fn advance(
    state: &ServerState,
    user: &CurrentUser,
    id: &str,
    to: MissionStatus,
    event: NotificationEvent,
) -> AppResult<Mission> {
    let employee_id = user.require_employee()?;
    let m = load_live(state, id).await?;
    if !m.is_assigned_to(employee_id) {
        return Err(AppError::new(ErrorCode::MissionNotAssigned));
    }
    if !m.status.can_transition_to(to) {
        return Err(invalid_transition(m.status, to));
    }

    if !mission::set_status(&state.pool, id, employee_id, m.status, to).await? {
        return Err(invalid_transition(m.status, to));
    }

    let m = load_live(state, id).await?;
    tracing::info!(mission_id = %id, status = to.as_str(), "Mission status changed");
    notifier::notify_mission(&state.pool, event, &m, Some(employee_id)).await;
    Ok(m)
}

fn invalid_transition(from: MissionStatus, to: MissionStatus) -> AppError {
    AppError::new(ErrorCode::MissionInvalidTransition)
        .with_detail("from", from.as_str())
        .with_detail("to", to.as_str())
}

/// POST /api/missions/:id/start - 开始任务
pub async fn start(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Mission>> {
    let m = advance(
        &state,
        &user,
        &id,
        MissionStatus::Started,
        NotificationEvent::MissionStarted,
    )
    .await?;
    Ok(Json(m))
}

/// POST /api/missions/:id/complete - 完成任务
pub async fn complete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Mission>> {
    let m = advance(
        &state,
        &user,
        &id,
        MissionStatus::Completed,
        NotificationEvent::MissionCompleted,
    )
    .await?;
    Ok(Json(m))
}

/// POST /api/missions/:id/remove-employee - 撤下员工
///
/// 任务回到 `pending`，被撤下的员工收到通知。
pub async fn remove_employee(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Mission>> {
    let m = load_live(&state, &id).await?;
    user.require_owner(&m.conciergerie_name)?;
    if !m.is_taken() {
        return Err(AppError::new(ErrorCode::MissionNotAssigned));
    }

    let previous = mission::remove_employee(&state.pool, &id).await?;
    let m = load_live(&state, &id).await?;

    if let Some(employee_id) = previous.as_deref() {
        tracing::info!(mission_id = %id, employee_id = %employee_id, "Employee removed from mission");
        notifier::notify_mission(
            &state.pool,
            NotificationEvent::MissionRemoved,
            &m,
            Some(employee_id),
        )
        .await;
    }
    Ok(Json(m))
}
