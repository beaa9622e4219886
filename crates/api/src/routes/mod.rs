pub mod admin;
pub mod app;
pub mod auth;
pub mod chirps;
pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /healthz                         readiness probe (public)
///
/// /users                           register (POST), self-update (PUT, access token)
///
/// /login                           login (public)
/// /refresh                         exchange refresh token (refresh token)
/// /revoke                          revoke refresh token (refresh token)
///
/// /chirps                          list (GET), create (POST, access token)
/// /chirps/{chirp_id}               get (GET), delete (DELETE, author only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/users", users::router())
        .merge(auth::router())
        .nest("/chirps", chirps::router())
}
