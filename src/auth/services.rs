use axum::http::{header::AUTHORIZATION, HeaderMap};
use tracing::{debug, error, info, warn};

use crate::{
    auth::{
        dto::NewUser,
        password::{hash_password, verify_password},
        repo::UserStore,
        repo_types::User,
        token::issue_access_token,
    },
    db::StoreError,
    error::ApiError,
    validation::FieldErrors,
};

/// Outcome of a login attempt that did not hit a backend failure.
#[derive(Debug)]
pub enum LoginOutcome {
    Authenticated(User),
    NotFound,
}

/// Reads the raw access token from the `Authorization` header. No scheme
/// prefix is expected.
pub(crate) fn access_token_from(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
}

/// Resolves the request's access token to its owner.
pub async fn authenticate(users: &dyn UserStore, headers: &HeaderMap) -> Result<User, ApiError> {
    let Some(token) = access_token_from(headers) else {
        debug!("missing Authorization header");
        return Err(ApiError::Unauthenticated);
    };

    match users.find_by_access_token(token).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => {
            warn!("unknown access token");
            Err(ApiError::Unauthenticated)
        }
        Err(e) => {
            error!(error = %e, "find_by_access_token failed");
            Err(ApiError::Internal(e.into()))
        }
    }
}

pub async fn register(users: &dyn UserStore, input: NewUser) -> Result<User, ApiError> {
    let hash = hash_password(&input.password).map_err(|e| {
        error!(error = %e, "hash_password failed");
        ApiError::UserRejected(FieldErrors::new())
    })?;
    let token = issue_access_token();

    match users
        .create(&input.username, &input.email, &hash, &token)
        .await
    {
        Ok(user) => {
            info!(user_id = %user.id, username = %user.username, "user registered");
            Ok(user)
        }
        Err(StoreError::DuplicateKey { field }) => {
            warn!(field, "registration rejected: duplicate key");
            let mut errors = FieldErrors::new();
            errors.unique(field);
            Err(ApiError::UserRejected(errors))
        }
        Err(e) => {
            error!(error = %e, "create user failed");
            Err(ApiError::UserRejected(FieldErrors::new()))
        }
    }
}

/// Unknown email and wrong password are both `NotFound`; only a failing
/// lookup or an unparseable stored hash is an error.
pub async fn login(
    users: &dyn UserStore,
    email: Option<&str>,
    password: Option<&str>,
) -> Result<LoginOutcome, ApiError> {
    let (Some(email), Some(password)) = (email, password) else {
        return Ok(LoginOutcome::NotFound);
    };

    let user = match users.find_by_email(email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!("login unknown email");
            return Ok(LoginOutcome::NotFound);
        }
        Err(e) => {
            error!(error = %e, "find_by_email failed");
            return Err(ApiError::CredentialLookup);
        }
    };

    let ok = verify_password(password, &user.password_hash).map_err(|e| {
        error!(error = %e, user_id = %user.id, "verify_password failed");
        ApiError::CredentialLookup
    })?;

    if !ok {
        warn!(user_id = %user.id, "login invalid password");
        return Ok(LoginOutcome::NotFound);
    }

    info!(user_id = %user.id, "user logged in");
    Ok(LoginOutcome::Authenticated(user))
}
