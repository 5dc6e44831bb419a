use sqlx::PgPool;

use crate::problems::dto::UpdateProblemRequest;
use crate::problems::repo_types::Problem;

pub async fn create(db: &PgPool, problem: &Problem) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO problems (id, author_id, community_id, status, title, content, input, output)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(problem.id)
    .bind(problem.author_id)
    .bind(problem.community_id)
    .bind(problem.status)
    .bind(&problem.title)
    .bind(&problem.content)
    .bind(&problem.input)
    .bind(&problem.output)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn find_by_id(db: &PgPool, id: i64) -> anyhow::Result<Option<Problem>> {
    let row = sqlx::query_as::<_, Problem>(
        r#"
        SELECT id, author_id, community_id, status, title, content, input, output, created_at
        FROM problems
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

/// Newest problems first.
pub async fn list(db: &PgPool, limit: i64, offset: i64) -> anyhow::Result<Vec<Problem>> {
    let rows = sqlx::query_as::<_, Problem>(
        r#"
        SELECT id, author_id, community_id, status, title, content, input, output, created_at
        FROM problems
        ORDER BY created_at DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn update(db: &PgPool, id: i64, req: &UpdateProblemRequest) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        UPDATE problems
        SET title = $2, content = $3, input = $4, output = $5
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(&req.title)
    .bind(&req.content)
    .bind(&req.input)
    .bind(&req.output)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn delete(db: &PgPool, id: i64) -> anyhow::Result<()> {
    sqlx::query(r#"DELETE FROM problems WHERE id = $1"#)
        .bind(id)
        .execute(db)
        .await?;
    Ok(())
}
