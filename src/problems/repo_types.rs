use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

/// Problem record in the database.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Problem {
    pub id: i64,
    pub author_id: i64,
    pub community_id: i64,
    pub status: i32,
    pub title: String,
    pub content: String,
    pub input: String,
    pub output: String,
    #[serde(skip_serializing)]
    pub created_at: OffsetDateTime, // internal ordering column, not exposed
}
