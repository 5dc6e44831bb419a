use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

/// Answer record. `parent_id` threads answers under another answer; NULL
/// means a top-level answer to the problem.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Answer {
    pub id: i64,
    pub problem_id: i64,
    pub author_id: i64,
    pub parent_id: Option<i64>,
    pub content: String,
    pub created_at: OffsetDateTime,
}
