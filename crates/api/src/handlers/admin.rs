//! Admin handlers: usage metrics and the development-only reset.

use axum::extract::State;
use axum::response::Html;
use axum::Json;
use chirpy_core::error::CoreError;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub msg: &'static str,
}

/// GET /admin/metrics
pub async fn metrics(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        "<html>\n  <body>\n    <h1>Welcome, Chirpy Admin</h1>\n    \
         <p>Chirpy has been visited {} times!</p>\n  </body>\n</html>\n",
        state.hits.get()
    ))
}

/// POST /admin/reset
///
/// Zero the hit counter and delete every user (cascading to their chirps
/// and refresh tokens). Refused unless `PLATFORM=dev`.
pub async fn reset(State(state): State<AppState>) -> AppResult<Json<ResetResponse>> {
    if !state.config.is_dev() {
        tracing::warn!(platform = %state.config.platform, "Reset refused outside dev");
        return Err(AppError::Core(CoreError::Forbidden(
            "Reset is only allowed in dev environment".into(),
        )));
    }

    state.hits.reset();
    let deleted = state.store.delete_all_users().await?;

    tracing::warn!(deleted_users = deleted, "Metrics and users table reset");
    Ok(Json(ResetResponse {
        msg: "Metrics and users table were reset",
    }))
}
