use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Energy level observation. Serialized with the field names clients already
/// read: `_id`, `value`, `user`, `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Level {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub value: f64,
    #[serde(rename = "user")]
    pub user_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}
