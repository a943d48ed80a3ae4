//! Session API Handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use shared::mission::{Role, Viewer};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{conciergerie, employee};
use crate::security_log;
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    pub user_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub token: String,
    pub role: Role,
    pub user_id: String,
    pub conciergerie_name: Option<String>,
    /// 令牌有效期 (秒)
    pub expires_in: i64,
}

/// Resolve a user id into a viewer
///
/// A conciergerie id wins; otherwise the id must belong to an accepted
/// employee.
async fn resolve_viewer(state: &ServerState, user_id: &str) -> AppResult<Viewer> {
    if let Some(c) = conciergerie::find_by_id(&state.pool, user_id).await? {
        return Ok(Viewer::conciergerie(c.id, c.name));
    }
    match employee::find_by_id(&state.pool, user_id).await? {
        Some(e) if e.is_accepted() => Ok(Viewer::employee(e.id)),
        Some(_) => Err(AppError::with_message(
            ErrorCode::EmployeeNotAccepted,
            "Your registration has not been accepted yet",
        )),
        None => Err(AppError::new(ErrorCode::NoSession)),
    }
}

/// POST /api/auth/session - 打开会话
pub async fn open_session(
    State(state): State<ServerState>,
    Json(req): Json<SessionRequest>,
) -> AppResult<Json<SessionResponse>> {
    let user_id = req.user_id.trim();
    if user_id.is_empty() {
        return Err(AppError::validation("user_id is required"));
    }

    let viewer = match resolve_viewer(&state, user_id).await {
        Ok(viewer) => viewer,
        Err(e) => {
            security_log!(WARN, "session_refused", user_id = %user_id, code = ?e.code);
            return Err(e);
        }
    };

    let token = state.jwt.generate_token(&viewer).map_err(|e| {
        tracing::error!(error = %e, "Failed to generate session token");
        AppError::internal("Failed to generate token")
    })?;

    security_log!(INFO, "session_opened", user_id = %user_id, role = viewer.role.as_str());

    Ok(Json(SessionResponse {
        token,
        role: viewer.role,
        user_id: user_id.to_string(),
        conciergerie_name: viewer.conciergerie_name,
        expires_in: state.jwt.config.expiration_minutes * 60,
    }))
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user_id: String,
    pub role: Role,
    pub conciergerie_name: Option<String>,
}

/// GET /api/auth/me - 当前会话
pub async fn me(user: CurrentUser) -> AppResult<Json<MeResponse>> {
    Ok(Json(MeResponse {
        user_id: user.id,
        role: user.role,
        conciergerie_name: user.conciergerie_name,
    }))
}
