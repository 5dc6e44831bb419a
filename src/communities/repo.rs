use sqlx::PgPool;

use crate::communities::repo_types::{Community, CommunityDetail};

pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Community>> {
    let rows = sqlx::query_as::<_, Community>(
        r#"
        SELECT id, name
        FROM communities
        ORDER BY id
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(db: &PgPool, id: i64) -> anyhow::Result<Option<CommunityDetail>> {
    let row = sqlx::query_as::<_, CommunityDetail>(
        r#"
        SELECT id, name, introduction, created_at
        FROM communities
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}
