//! Static file server mounted at `/app`.

use std::path::Path;

use axum::middleware::from_fn_with_state;
use axum::Router;
use tower_http::services::ServeDir;

use crate::middleware::hits::count_hits;
use crate::state::AppState;

/// Serve `root` under `/app`, counting every request.
///
/// Needs the state up front because the counting layer captures it.
pub fn router(state: &AppState, root: &Path) -> Router<AppState> {
    Router::new()
        .nest_service("/app", ServeDir::new(root))
        .layer(from_fn_with_state(state.clone(), count_hits))
}
