use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::db::StoreError;
use crate::levels::repo_types::Level;

/// Level persistence. Levels are only ever read back filtered by owner.
#[async_trait]
pub trait LevelStore: Send + Sync {
    async fn create(
        &self,
        value: f64,
        user_id: Uuid,
        date: OffsetDateTime,
    ) -> Result<Level, StoreError>;

    /// All levels owned by `user_id`, in whatever order the store yields them.
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Level>, StoreError>;
}

#[derive(Clone)]
pub struct PgLevelStore {
    db: PgPool,
}

impl PgLevelStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LevelStore for PgLevelStore {
    async fn create(
        &self,
        value: f64,
        user_id: Uuid,
        date: OffsetDateTime,
    ) -> Result<Level, StoreError> {
        let level = sqlx::query_as::<_, Level>(
            r#"
            INSERT INTO levels (value, user_id, date)
            VALUES ($1, $2, $3)
            RETURNING id, value, user_id, date
            "#,
        )
        .bind(value)
        .bind(user_id)
        .bind(date)
        .fetch_one(&self.db)
        .await?;
        Ok(level)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Level>, StoreError> {
        let rows = sqlx::query_as::<_, Level>(
            r#"
            SELECT id, value, user_id, date
            FROM levels
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}
