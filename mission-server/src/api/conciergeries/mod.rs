//! Conciergerie API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/conciergeries", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/by-name/{name}", get(handler::get_by_name))
        .route("/{id}", get(handler::get_by_id).put(handler::update))
        .route("/{id}/claim", post(handler::claim))
}
