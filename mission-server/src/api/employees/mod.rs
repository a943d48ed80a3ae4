//! Employee API 模块
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/employees | GET | 员工列表 (`?search=`) | 礼宾公司 |
//! | /api/employees | POST | 员工注册 | 无 |
//! | /api/employees/{id} | GET | 获取员工 | 本人或礼宾公司 |
//! | /api/employees/{id} | PUT | 更新资料和通知设置 | 本人 |
//! | /api/employees/{id}/status | PUT | 接受 / 拒绝 | 礼宾公司 |
//! | /api/employees/{id}/points | GET | 某日积分 (`?date=YYYY-MM-DD`) | 本人或礼宾公司 |

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub use handler::PointsResponse;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/employees", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::register))
        .route("/{id}", get(handler::get_by_id).put(handler::update))
        .route("/{id}/status", put(handler::update_status))
        .route("/{id}/points", get(handler::points))
}
