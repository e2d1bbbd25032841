use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use super::{repo_types::User, services::authenticate};
use crate::{error::ApiError, state::AppState};

/// Guard for protected routes: resolves the `Authorization` token to a user
/// before the handler runs, rejecting with 401 `{"loggedOut": true}`.
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(state.users.as_ref(), &parts.headers)
            .await
            .map(AuthUser)
    }
}
