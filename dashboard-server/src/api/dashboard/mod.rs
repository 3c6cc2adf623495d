//! Dashboard page and snapshot API

pub(crate) mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::page))
        .route("/api/dashboard", get(handler::snapshot))
        .route("/api/dashboard/refresh", post(handler::refresh))
}
