use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tracing::{instrument, warn};

use crate::{
    auth::{
        dto::{
            CreateUserRequest, CreatedUserResponse, LoginRequest, NotFoundResponse,
            SecretResponse, SessionResponse,
        },
        extractors::AuthUser,
        services::{login, register, LoginOutcome},
    },
    error::ApiError,
    state::AppState,
    validation::FieldErrors,
};

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user))
        .route("/sessions", post(create_session))
}

pub fn secret_routes() -> Router<AppState> {
    Router::new().route("/secrets", get(get_secret))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedUserResponse>), ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        warn!(status = %rejection.status(), "registration body rejected");
        let mut errors = FieldErrors::new();
        errors.malformed_body(rejection.body_text());
        ApiError::UserRejected(errors)
    })?;
    let input = payload.validate().map_err(ApiError::UserRejected)?;
    let user = register(state.users.as_ref(), input).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedUserResponse {
            username: user.username,
            id: user.id,
            access_token: user.access_token,
        }),
    ))
}

/// 201 with the token on a match, 200 `{"notFound": true}` otherwise.
/// A body that is not a JSON object of strings carries no usable
/// credentials and is answered the same way as a missing email.
#[instrument(skip(state, payload))]
pub async fn create_session(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let payload = match payload {
        Ok(Json(p)) => p,
        Err(rejection) => {
            warn!(status = %rejection.status(), "login body rejected");
            LoginRequest::default()
        }
    };
    let outcome = login(
        state.users.as_ref(),
        payload.email.as_deref(),
        payload.password.as_deref(),
    )
    .await?;

    Ok(match outcome {
        LoginOutcome::Authenticated(user) => (
            StatusCode::CREATED,
            Json(SessionResponse {
                username: user.username,
                user_id: user.id,
                access_token: user.access_token,
            }),
        )
            .into_response(),
        LoginOutcome::NotFound => Json(NotFoundResponse { not_found: true }).into_response(),
    })
}

#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn get_secret(AuthUser(user): AuthUser) -> Json<SecretResponse> {
    Json(SecretResponse {
        secret: "This is the secret",
    })
}
