use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

/// Summary row for the community list.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Community {
    pub id: i64,
    pub name: String,
}

/// Full community record.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CommunityDetail {
    pub id: i64,
    pub name: String,
    pub introduction: String,
    pub created_at: OffsetDateTime,
}
