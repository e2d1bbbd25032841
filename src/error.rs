use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::validation::FieldErrors;

/// Errors surfaced at the route boundary. Every variant renders as JSON.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or unknown access token on a protected route (401).
    #[error("not authenticated")]
    Unauthenticated,

    /// Registration rejected: missing fields or a duplicate username/email (400).
    #[error("could not create user")]
    UserRejected(FieldErrors),

    /// Level creation rejected by validation (400).
    #[error("could not save level")]
    LevelRejected(FieldErrors),

    /// Login lookup or hash verification blew up (401).
    #[error("credential lookup failed")]
    CredentialLookup,

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Unauthenticated => (StatusCode::UNAUTHORIZED, json!({ "loggedOut": true })),
            ApiError::UserRejected(errors) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "message": "Could not create user. Please try again!",
                    "errors": errors,
                }),
            ),
            ApiError::LevelRejected(errors) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "message": "Could not save level",
                    "error": errors,
                }),
            ),
            ApiError::CredentialLookup => (
                StatusCode::UNAUTHORIZED,
                json!({ "message": "Username or password is incorrect" }),
            ),
            ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "message": "Internal server error" }),
            ),
        };
        (status, Json(body)).into_response()
    }
}
