//! In-memory stores for exercising handlers without PostgreSQL.

use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::{repo::UserStore, repo_types::User};
use crate::db::StoreError;
use crate::levels::{repo::LevelStore, repo_types::Level};

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        access_token: &str,
    ) -> Result<User, StoreError> {
        let mut users = self.users.lock().unwrap();
        for u in users.iter() {
            if u.username == username {
                return Err(StoreError::DuplicateKey { field: "username" });
            }
            if u.email == email {
                return Err(StoreError::DuplicateKey { field: "email" });
            }
            if u.access_token == access_token {
                return Err(StoreError::DuplicateKey { field: "accessToken" });
            }
        }
        let user = User {
            id: Uuid::new_v4(),
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            access_token: access_token.into(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_access_token(&self, token: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.access_token == token).cloned())
    }
}

#[derive(Default)]
pub struct MemoryLevelStore {
    levels: Mutex<Vec<Level>>,
}

#[async_trait]
impl LevelStore for MemoryLevelStore {
    async fn create(
        &self,
        value: f64,
        user_id: Uuid,
        date: OffsetDateTime,
    ) -> Result<Level, StoreError> {
        let level = Level {
            id: Uuid::new_v4(),
            value,
            user_id,
            date,
        };
        self.levels.lock().unwrap().push(level.clone());
        Ok(level)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Level>, StoreError> {
        let levels = self.levels.lock().unwrap();
        Ok(levels
            .iter()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect())
    }
}

/// Every call fails as if the pool were unreachable.
pub struct FailingUserStore;

#[async_trait]
impl UserStore for FailingUserStore {
    async fn create(&self, _: &str, _: &str, _: &str, _: &str) -> Result<User, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn find_by_email(&self, _: &str) -> Result<Option<User>, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn find_by_access_token(&self, _: &str) -> Result<Option<User>, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
}
