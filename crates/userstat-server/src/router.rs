//! Axum router wiring.
//!
//! - `/`        : classification endpoint (POST; other methods get 405)
//! - `/metrics` : Prometheus text format
//! - `/healthz` : liveness

use axum::{
    routing::{any, get},
    Router,
};

use crate::{app_state::AppState, ops, transport};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", any(transport::http::classify))
        .route("/metrics", get(ops::metrics))
        .route("/healthz", get(ops::healthz))
        .with_state(state)
}
