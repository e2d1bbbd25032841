use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;

use crate::config::AppConfig;

/// Failure reported by a store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique column already holds the value being inserted.
    #[error("duplicate key on {field}")]
    DuplicateKey { field: &'static str },
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Classifies an insert failure, turning unique violations into
    /// `DuplicateKey` keyed by the client-facing field name.
    pub fn from_insert(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return StoreError::DuplicateKey {
                    field: field_for_constraint(db_err.constraint()),
                };
            }
        }
        StoreError::Database(err)
    }
}

fn field_for_constraint(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some("users_username_key") => "username",
        Some("users_email_key") => "email",
        Some("users_access_token_key") => "accessToken",
        _ => "unknown",
    }
}

pub async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("connect to database")
}

pub async fn migrate(db: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(db)
        .await
        .context("run migrations")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_constraints_to_fields() {
        assert_eq!(field_for_constraint(Some("users_username_key")), "username");
        assert_eq!(field_for_constraint(Some("users_email_key")), "email");
        assert_eq!(
            field_for_constraint(Some("users_access_token_key")),
            "accessToken"
        );
        assert_eq!(field_for_constraint(Some("something_else")), "unknown");
        assert_eq!(field_for_constraint(None), "unknown");
    }

    #[test]
    fn non_database_errors_stay_database() {
        let err = StoreError::from_insert(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StoreError::Database(_)));
    }
}
