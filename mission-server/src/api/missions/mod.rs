//! Mission API 模块
//!
//! # 路由
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/missions | GET | 列表管线: 可见性 → 过滤 → 排序 → 分组 |
//! | /api/missions | POST | 创建任务 (礼宾公司) |
//! | /api/missions/feed | GET | 进行中的任务动态 |
//! | /api/missions/{id} | GET/PUT/DELETE | 获取 / 编辑 / 软删除 |
//! | /api/missions/{id}/accept | POST | 员工接单 |
//! | /api/missions/{id}/start | POST | 开始任务 |
//! | /api/missions/{id}/complete | POST | 完成任务 |
//! | /api/missions/{id}/remove-employee | POST | 礼宾公司撤下员工 |

mod handler;
mod lifecycle;

use axum::{
    Router,
    routing::{get, post},
};

use shared::models::Mission;

use crate::core::ServerState;
use crate::db::repository::{RepoError, mission};
use crate::utils::{AppError, AppResult, ErrorCode};

pub use handler::MissionListQuery;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/missions", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/feed", get(handler::feed))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/accept", post(lifecycle::accept))
        .route("/{id}/start", post(lifecycle::start))
        .route("/{id}/complete", post(lifecycle::complete))
        .route("/{id}/remove-employee", post(lifecycle::remove_employee))
}

fn mission_not_found(id: &str) -> AppError {
    AppError::with_message(ErrorCode::MissionNotFound, format!("Mission {id} not found"))
}

fn map_missing(id: &str) -> impl FnOnce(RepoError) -> AppError + '_ {
    move |e| match e {
        RepoError::NotFound(_) => mission_not_found(id),
        other => other.into(),
    }
}

/// Live mission or `MissionNotFound`
async fn load_live(state: &ServerState, id: &str) -> AppResult<Mission> {
    mission::get_live(&state.pool, id).await.map_err(map_missing(id))
}
