//! HTTP routes
//!
//! | Route | Purpose |
//! |-------|---------|
//! | `GET /` | Dashboard page |
//! | `POST /report` | Dashboard page with PDF export result |
//! | `GET /api/dashboard` | Snapshot as JSON |
//! | `POST /api/dashboard/refresh` | Drop the cached fact table |
//! | `POST /api/report` | PDF export as JSON |
//! | `GET /health` | Liveness |

pub mod dashboard;
pub mod health;
pub mod report;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Build the full application router
pub fn build_app(state: ServerState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(dashboard::router())
        .merge(report::router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}
