//! Request body extractors that reject through [`AppError`].

use axum::extract::FromRequest;

use crate::error::AppError;

/// `Json<T>` whose rejections use the `{"error", "code"}` error shape
/// instead of axum's plain-text 422.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
