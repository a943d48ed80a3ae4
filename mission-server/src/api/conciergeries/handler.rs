//! Conciergerie API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use shared::models::{ClaimOutcome, Conciergerie, ConciergerieCreate, ConciergerieUpdate};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{RepoError, conciergerie};
use crate::security_log;
use crate::utils::{AppError, AppResult, ErrorCode};

fn not_found(what: &str) -> AppError {
    AppError::with_message(
        ErrorCode::ConciergerieNotFound,
        format!("Conciergerie {what} not found"),
    )
}

fn map_name_clash(err: RepoError) -> AppError {
    match err {
        RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::ConciergerieNameExists, msg),
        other => other.into(),
    }
}

/// GET /api/conciergeries - 获取所有礼宾公司 (按名称排序)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Conciergerie>>> {
    let all = conciergerie::find_all(&state.pool).await?;
    Ok(Json(all))
}

/// GET /api/conciergeries/:id - 获取单个礼宾公司
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Conciergerie>> {
    let c = conciergerie::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| not_found(&id))?;
    Ok(Json(c))
}

/// GET /api/conciergeries/by-name/:name - 按名称获取
pub async fn get_by_name(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> AppResult<Json<Conciergerie>> {
    let c = conciergerie::find_by_name(&state.pool, &name)
        .await?
        .ok_or_else(|| not_found(&name))?;
    Ok(Json(c))
}

/// POST /api/conciergeries - 创建礼宾公司 (公共接口)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ConciergerieCreate>,
) -> AppResult<Json<Conciergerie>> {
    payload.validate()?;
    let c = conciergerie::create(&state.pool, payload)
        .await
        .map_err(map_name_clash)?;
    tracing::info!(conciergerie_id = %c.id, name = %c.name, "Conciergerie created");
    Ok(Json(c))
}

/// PUT /api/conciergeries/:id - 更新礼宾公司 (仅本公司)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ConciergerieUpdate>,
) -> AppResult<Json<Conciergerie>> {
    user.require_conciergerie()?;
    if user.id != id {
        security_log!(WARN, "foreign_update", user_id = %user.id, conciergerie_id = %id);
        return Err(AppError::new(ErrorCode::NotOwner));
    }
    payload.validate()?;

    if let Some(name) = payload.name.as_deref()
        && let Some(other) = conciergerie::find_by_name(&state.pool, name).await?
        && other.id != id
    {
        return Err(AppError::with_message(
            ErrorCode::ConciergerieNameExists,
            format!("Conciergerie '{name}' already exists"),
        ));
    }

    let c = conciergerie::update(&state.pool, &id, payload)
        .await
        .map_err(map_name_clash)?;
    Ok(Json(c))
}

#[derive(Debug, Deserialize)]
pub struct ClaimRequest {
    pub user_id: String,
}

/// POST /api/conciergeries/:id/claim - 认领礼宾公司 (公共接口)
///
/// 将礼宾公司的 ID 改为认领用户的 ID。
pub async fn claim(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<ClaimRequest>,
) -> AppResult<Json<ClaimOutcome>> {
    let user_id = req.user_id.trim();
    if user_id.is_empty() {
        return Err(AppError::validation("user_id is required"));
    }

    if id == user_id {
        return match conciergerie::find_by_id(&state.pool, &id).await? {
            Some(_) => Ok(Json(ClaimOutcome {
                success: true,
                message: Some("Conciergerie already belongs to this user".to_string()),
            })),
            None => Err(not_found(&id)),
        };
    }

    match conciergerie::update_id(&state.pool, &id, user_id).await {
        Ok(c) => {
            security_log!(INFO, "conciergerie_claimed", previous_id = %id, user_id = %user_id, name = %c.name);
            Ok(Json(ClaimOutcome {
                success: true,
                message: None,
            }))
        }
        Err(RepoError::NotFound(_)) => Err(not_found(&id)),
        Err(RepoError::Duplicate(msg)) => {
            security_log!(WARN, "claim_refused", conciergerie_id = %id, user_id = %user_id);
            Err(AppError::with_message(ErrorCode::ConciergerieClaimFailed, msg))
        }
        Err(e) => Err(e.into()),
    }
}
