//! PDF report export

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/report", post(handler::export_page))
        .route("/api/report", post(handler::export_json))
}
