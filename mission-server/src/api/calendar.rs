//! 日历视图路由
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/calendar | GET | 当前会话的日历 (`?locale=fr&tz_offset=120`) |

use axum::{
    Json, Router,
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use shared::calendar::build_calendar;
use shared::util::now_millis;

use crate::api::query::viewer_locale;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::mission;
use crate::utils::AppResult;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/calendar", get(calendar))
}

#[derive(Debug, Default, Deserialize)]
pub struct CalendarQuery {
    pub locale: Option<String>,
    pub tz_offset: Option<i32>,
}

/// GET /api/calendar - 日历视图
///
/// 员工看到自己接下的任务，礼宾公司看到本公司已被接下的任务。
async fn calendar(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<CalendarQuery>,
) -> AppResult<Response> {
    let locale = viewer_locale(
        query.locale.as_deref(),
        query.tz_offset,
        state.config.default_locale,
    )?;
    let missions = mission::find_all(&state.pool).await?;
    let view = build_calendar(&missions, &user.viewer(), now_millis(), &locale);
    Ok(Json(&view).into_response())
}
