//! Hit-counting middleware for the static file server.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::state::AppState;

/// Increment the hit counter, then run the wrapped service.
///
/// Mount with `axum::middleware::from_fn_with_state`.
pub async fn count_hits(State(state): State<AppState>, request: Request, next: Next) -> Response {
    state.hits.increment();
    next.run(request).await
}
