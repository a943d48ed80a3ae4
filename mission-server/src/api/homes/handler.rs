//! Home API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use shared::models::{Home, HomeCreate, HomeUpdate};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{RepoError, home, mission};
use crate::services::notifier::{self, NotificationEvent};
use crate::utils::{AppError, AppResult, ErrorCode};

fn home_not_found(id: &str) -> AppError {
    AppError::with_message(ErrorCode::HomeNotFound, format!("Home {id} not found"))
}

fn map_home_error(err: RepoError) -> AppError {
    match err {
        RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::HomeTitleExists, msg),
        RepoError::NotFound(msg) => AppError::with_message(ErrorCode::HomeNotFound, msg),
        other => other.into(),
    }
}

/// Live home owned by the session's conciergerie
async fn owned_home(state: &ServerState, user: &CurrentUser, id: &str) -> AppResult<Home> {
    let h = home::find_by_id(&state.pool, id)
        .await?
        .filter(|h| !h.deleted)
        .ok_or_else(|| home_not_found(id))?;
    user.require_owner(&h.conciergerie_name)?;
    Ok(h)
}

/// GET /api/homes - 获取房源列表
///
/// 礼宾公司只看到自己的房源；员工看到全部 (用于区域和标题查找)。
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Home>>> {
    let scope = if user.is_employee() {
        None
    } else {
        Some(user.require_conciergerie()?)
    };
    let homes = home::find_all(&state.pool, scope).await?;
    Ok(Json(homes))
}

/// GET /api/homes/:id - 获取单个房源 (含已删除)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Home>> {
    let h = home::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| home_not_found(&id))?;
    Ok(Json(h))
}

/// POST /api/homes - 创建房源
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<HomeCreate>,
) -> AppResult<Json<Home>> {
    let conciergerie_name = user.require_conciergerie()?;
    let payload = payload.normalized();
    payload.validate()?;

    let h = home::create(&state.pool, conciergerie_name, payload)
        .await
        .map_err(map_home_error)?;
    tracing::info!(home_id = %h.id, title = %h.title, conciergerie = %conciergerie_name, "Home created");
    Ok(Json(h))
}

/// PUT /api/homes/:id - 更新房源
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<HomeUpdate>,
) -> AppResult<Json<Home>> {
    payload.validate()?;
    owned_home(&state, &user, &id).await?;

    let h = home::update(&state.pool, &id, payload)
        .await
        .map_err(map_home_error)?;
    Ok(Json(h))
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteQuery {
    /// 同时删除该房源的任务
    #[serde(default)]
    pub cascade: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HomeDeleted {
    pub id: String,
    pub deleted_missions: u64,
}

/// DELETE /api/homes/:id - 软删除房源
///
/// 仍有任务时需要 `?cascade=true`，被级联删除任务的员工会收到通知。
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> AppResult<Json<HomeDeleted>> {
    owned_home(&state, &user, &id).await?;

    let affected: Vec<_> = mission::find_all(&state.pool)
        .await?
        .into_iter()
        .filter(|m| m.home_id == id)
        .collect();

    let deleted_missions = match home::soft_delete(&state.pool, &id, query.cascade).await {
        Ok(n) => n,
        Err(RepoError::Validation(msg)) => {
            return Err(AppError::with_message(ErrorCode::HomeHasMissions, msg)
                .with_detail("missions", affected.len()));
        }
        Err(e) => return Err(map_home_error(e)),
    };

    for m in affected.iter().filter(|m| m.is_taken()) {
        notifier::notify_mission(
            &state.pool,
            NotificationEvent::MissionDeleted,
            m,
            m.employee_id.as_deref(),
        )
        .await;
    }

    tracing::info!(home_id = %id, deleted_missions, "Home deleted");
    Ok(Json(HomeDeleted {
        id,
        deleted_missions,
    }))
}
