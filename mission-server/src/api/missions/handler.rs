//! Mission API Handlers
//!
//! 列表接口按以下顺序执行:
//!
//! ```text
//! visible_missions → MissionFilter::apply → sort_missions → categorize_missions
//! ```

use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use shared::mission::{
    MissionCategory, MissionFilter, SortDirection, SortField, TakenStatus, TemporalStatus,
    active_missions, categorize_missions, sort_missions, visible_missions,
};
use shared::models::{Home, Mission, MissionCreate, MissionUpdate, check_time_window};
use shared::util::now_millis;
use validator::Validate;

use super::{load_live, map_missing};
use crate::api::query::{parse_token, parse_tokens, split_values, viewer_locale};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{home, mission};
use crate::services::notifier::{self, NotificationEvent};
use crate::utils::{AppError, AppResult, ErrorCode};

/// `?conciergeries=A,B&statuses=current&taken=notTaken&zones=Nice&sort=date&direction=desc&group=true`
#[derive(Debug, Default, Deserialize)]
pub struct MissionListQuery {
    pub conciergeries: Option<String>,
    pub statuses: Option<String>,
    pub taken: Option<String>,
    pub zones: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
    /// 按排序字段分组
    #[serde(default)]
    pub group: bool,
    pub locale: Option<String>,
    /// 分钟, UTC 以东为正
    pub tz_offset: Option<i32>,
}

#[derive(Debug, Serialize)]
struct MissionList<'a> {
    total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    missions: Option<Vec<&'a Mission>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    categories: Option<Vec<MissionCategory<'a>>>,
}

fn time_window_error(start: i64, end: i64) -> AppResult<()> {
    check_time_window(start, end).map_err(|e| {
        let msg = e
            .message
            .map(|m| m.to_string())
            .unwrap_or_else(|| e.code.to_string());
        AppError::with_message(ErrorCode::MissionInvalidTimeWindow, msg)
    })
}

/// Live home the session's conciergerie owns
async fn owned_home(state: &ServerState, user: &CurrentUser, home_id: &str) -> AppResult<Home> {
    let h = home::find_by_id(&state.pool, home_id)
        .await?
        .filter(|h| !h.deleted)
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::HomeNotFound, format!("Home {home_id} not found"))
        })?;
    user.require_owner(&h.conciergerie_name)?;
    Ok(h)
}

/// GET /api/missions - 任务列表 (过滤、排序、分组)
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<MissionListQuery>,
) -> AppResult<Response> {
    let statuses: Vec<TemporalStatus> = parse_tokens("statuses", query.statuses.as_deref())?;
    let taken: Vec<TakenStatus> = parse_tokens("taken", query.taken.as_deref())?;
    let sort: SortField = parse_token("sort", query.sort.as_deref())?.unwrap_or_default();
    let direction: SortDirection =
        parse_token("direction", query.direction.as_deref())?.unwrap_or_default();
    let locale = viewer_locale(
        query.locale.as_deref(),
        query.tz_offset,
        state.config.default_locale,
    )?;

    let filter = MissionFilter::new()
        .with_conciergeries(split_values(query.conciergeries.as_deref()))
        .with_statuses(statuses)
        .with_taken(taken)
        .with_zones(split_values(query.zones.as_deref()));

    let missions = mission::find_all(&state.pool).await?;
    let homes = home::find_all(&state.pool, None).await?;

    let viewer = user.viewer();
    let visible = visible_missions(&missions, &viewer);
    let filtered = filter.apply(visible, &homes);
    let sorted = sort_missions(filtered, sort, direction, &homes);

    let total = sorted.len();
    let body = if query.group {
        MissionList {
            total,
            missions: None,
            categories: Some(categorize_missions(sorted, sort, &homes, &locale)),
        }
    } else {
        MissionList {
            total,
            missions: Some(sorted),
            categories: None,
        }
    };
    Ok(Json(&body).into_response())
}

/// GET /api/missions/feed - 尚未结束的可见任务
///
/// 员工只看到无人接的任务。
pub async fn feed(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Mission>>> {
    let missions = mission::find_all(&state.pool).await?;
    let feed = active_missions(&missions, &user.viewer(), now_millis())
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(feed))
}

/// GET /api/missions/:id - 获取单个任务
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Mission>> {
    let m = load_live(&state, &id).await?;
    if user.is_employee() && !m.is_visible_to_employee(&user.id) {
        return Err(AppError::new(ErrorCode::MissionNotVisible));
    }
    Ok(Json(m))
}

/// POST /api/missions - 创建任务
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<MissionCreate>,
) -> AppResult<Json<Mission>> {
    user.require_conciergerie()?;
    time_window_error(payload.start_date_time, payload.end_date_time)?;
    payload.validate()?;

    let h = owned_home(&state, &user, &payload.home_id).await?;
    let m = mission::create(&state.pool, &h, payload).await?;

    tracing::info!(mission_id = %m.id, home_id = %h.id, hours = m.hours, "Mission created");
    Ok(Json(m))
}

/// PUT /api/missions/:id - 编辑任务
///
/// 只有未开始且未结束的任务可以编辑；已接单的员工会收到变更通知。
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<MissionUpdate>,
) -> AppResult<Json<Mission>> {
    let existing = load_live(&state, &id).await?;
    user.require_owner(&existing.conciergerie_name)?;
    if !existing.is_editable_at(now_millis()) {
        return Err(AppError::new(ErrorCode::MissionNotEditable));
    }
    payload.validate()?;
    time_window_error(
        payload.start_date_time.unwrap_or(existing.start_date_time),
        payload.end_date_time.unwrap_or(existing.end_date_time),
    )?;

    let target_home_id = payload.home_id.as_deref().unwrap_or(&existing.home_id);
    let h = owned_home(&state, &user, target_home_id).await?;

    let m = mission::update(&state.pool, &existing, &h, payload).await?;

    if let Some(employee_id) = m.employee_id.as_deref() {
        notifier::notify_mission(
            &state.pool,
            NotificationEvent::MissionChanged,
            &m,
            Some(employee_id),
        )
        .await;
    }
    Ok(Json(m))
}

/// DELETE /api/missions/:id - 软删除任务
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let existing = load_live(&state, &id).await?;
    user.require_owner(&existing.conciergerie_name)?;

    mission::soft_delete(&state.pool, &id)
        .await
        .map_err(map_missing(&id))?;

    if let Some(employee_id) = existing.employee_id.as_deref() {
        notifier::notify_mission(
            &state.pool,
            NotificationEvent::MissionDeleted,
            &existing,
            Some(employee_id),
        )
        .await;
    }
    tracing::info!(mission_id = %id, "Mission deleted");
    Ok(Json(true))
}
