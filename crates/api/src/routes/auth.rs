//! Route definitions for login and refresh-token handling.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes merged at the `/api` root.
///
/// ```text
/// POST /login    -> login
/// POST /refresh  -> refresh (refresh token as bearer)
/// POST /revoke   -> revoke  (refresh token as bearer)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
        .route("/revoke", post(auth::revoke))
}
