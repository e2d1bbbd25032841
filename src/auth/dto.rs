use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::{require_text, FieldErrors};

/// Request body for user registration. Fields are optional so that a missing
/// one is reported as a field error rather than a body rejection.
#[derive(Debug, Default, Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Registration input that passed presence checks.
#[derive(Debug)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl CreateUserRequest {
    pub fn validate(self) -> Result<NewUser, FieldErrors> {
        let mut errors = FieldErrors::new();
        let username = require_text(&mut errors, "username", self.username);
        let email = require_text(&mut errors, "email", self.email);
        let password = require_text(&mut errors, "password", self.password);
        errors.into_result(NewUser {
            username,
            email,
            password,
        })
    }
}

/// Request body for login.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedUserResponse {
    pub username: String,
    pub id: Uuid,
    pub access_token: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub username: String,
    pub user_id: Uuid,
    pub access_token: String,
}

/// Returned with 200 when the email is unknown or the password is wrong.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotFoundResponse {
    pub not_found: bool,
}

#[derive(Debug, Serialize)]
pub struct SecretResponse {
    pub secret: &'static str,
}
