use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Router};

use crate::state::AppState;

/// GET /healthz -- plain-text readiness probe.
///
/// Returns `OK` when the store answers, 503 otherwise.
async fn healthz(State(state): State<AppState>) -> (StatusCode, &'static str) {
    match state.store.health_check().await {
        Ok(()) => (StatusCode::OK, "OK"),
        Err(e) => {
            tracing::error!(error = %e, "Store health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable")
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/healthz", get(healthz))
}
