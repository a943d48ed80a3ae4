//! 会话 API 模块
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/auth/session | POST | 用户 ID 换取会话令牌 | 无 |
//! | /api/auth/me | GET | 当前会话信息 | 需要 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub use handler::{SessionRequest, SessionResponse};

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/auth", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/session", post(handler::open_session))
        .route("/me", get(handler::me))
}
