use sqlx::FromRow;
use uuid::Uuid;

/// User record in the database. Never serialized; handlers copy the public
/// fields into response DTOs.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String, // Argon2 PHC string
    pub access_token: String,
}
