//! Handlers for the `/chirps` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chirpy_core::error::CoreError;
use chirpy_core::types::DbId;
use chirpy_db::models::chirp::{Chirp, ChirpQuery, CreateChirp, SortOrder};
use chirpy_db::StoreError;
use serde::Deserialize;

use crate::auth::guard::authorize_ownership;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /chirps`.
#[derive(Debug, Deserialize)]
pub struct CreateChirpRequest {
    pub body: String,
}

/// Query parameters for `GET /chirps`.
#[derive(Debug, Default, Deserialize)]
pub struct ListChirpsParams {
    pub author_id: Option<String>,
    pub sort: Option<String>,
}

impl ListChirpsParams {
    fn into_query(self) -> AppResult<ChirpQuery> {
        let author_id = self
            .author_id
            .map(|raw| parse_id(&raw, "author_id"))
            .transpose()?;

        let order = match self.sort.as_deref().map(str::trim) {
            None | Some("") | Some("asc") => SortOrder::Asc,
            Some("desc") => SortOrder::Desc,
            Some(other) => {
                return Err(AppError::BadRequest(format!(
                    "Invalid sort order '{other}'. Expected 'asc' or 'desc'"
                )))
            }
        };

        Ok(ChirpQuery { author_id, order })
    }
}

fn parse_id(raw: &str, field: &str) -> AppResult<DbId> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid {field}: must be a UUID")))
}

/// POST /api/chirps
///
/// The author is always the authenticated user. The body is moderated
/// before it is stored.
pub async fn create_chirp(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateChirpRequest>,
) -> AppResult<(StatusCode, Json<Chirp>)> {
    let body = state.chirp_filter.validate(&input.body)?;

    let chirp = state
        .store
        .create_chirp(&CreateChirp {
            body,
            user_id: auth.user_id,
        })
        .await
        .map_err(|e| match e {
            // The token outlived its user (e.g. after an admin reset).
            StoreError::ForeignKey { .. } => {
                AppError::Core(CoreError::Unauthorized("User no longer exists".into()))
            }
            other => AppError::Store(other),
        })?;

    tracing::info!(chirp_id = %chirp.id, user_id = %auth.user_id, "Chirp created");
    Ok((StatusCode::CREATED, Json(chirp)))
}

/// GET /api/chirps
pub async fn list_chirps(
    State(state): State<AppState>,
    Query(params): Query<ListChirpsParams>,
) -> AppResult<Json<Vec<Chirp>>> {
    let query = params.into_query()?;
    let chirps = state.store.list_chirps(&query).await?;
    Ok(Json(chirps))
}

/// GET /api/chirps/{chirp_id}
pub async fn get_chirp(
    State(state): State<AppState>,
    Path(chirp_id): Path<String>,
) -> AppResult<Json<Chirp>> {
    let id = parse_id(&chirp_id, "chirp ID")?;
    let chirp = state
        .store
        .find_chirp(id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Chirp", id)))?;
    Ok(Json(chirp))
}

/// DELETE /api/chirps/{chirp_id}
///
/// Only the author may delete a chirp.
pub async fn delete_chirp(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(chirp_id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_id(&chirp_id, "chirp ID")?;
    let chirp = state
        .store
        .find_chirp(id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Chirp", id)))?;

    if let Err(e) = authorize_ownership(auth.user_id, chirp.user_id) {
        tracing::warn!(chirp_id = %id, user_id = %auth.user_id, "Chirp delete denied");
        return Err(e.into());
    }

    // A concurrent delete may have won; report that as not found.
    if !state.store.delete_chirp(id).await? {
        return Err(AppError::Core(CoreError::not_found("Chirp", id)));
    }

    tracing::info!(chirp_id = %id, user_id = %auth.user_id, "Chirp deleted");
    Ok(StatusCode::NO_CONTENT)
}
