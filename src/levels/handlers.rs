use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::extractors::AuthUser,
    error::ApiError,
    levels::{dto::CreateLevelRequest, repo_types::Level},
    state::AppState,
    validation::FieldErrors,
};

pub fn level_routes() -> Router<AppState> {
    Router::new().route("/levels", get(list_levels).post(create_level))
}

#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn create_level(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    body: Result<Json<CreateLevelRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Level>), ApiError> {
    let Json(body) = body.map_err(|rejection| {
        warn!(status = %rejection.status(), "level body rejected");
        let mut errors = FieldErrors::new();
        errors.malformed_body(rejection.body_text());
        ApiError::LevelRejected(errors)
    })?;
    let input = body.validate().map_err(|errors| {
        warn!(?errors, "level rejected");
        ApiError::LevelRejected(errors)
    })?;

    let level = state
        .levels
        .create(input.value, user.id, input.date)
        .await
        .map_err(|e| {
            error!(error = %e, "create level failed");
            ApiError::LevelRejected(FieldErrors::new())
        })?;

    info!(level_id = %level.id, "level saved");
    Ok((StatusCode::CREATED, Json(level)))
}

#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn list_levels(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<Level>>, ApiError> {
    let levels = state.levels.list_by_user(user.id).await.map_err(|e| {
        error!(error = %e, "list levels failed");
        ApiError::Internal(e.into())
    })?;
    Ok(Json(levels))
}
