use sqlx::PgPool;

use crate::answers::repo_types::Answer;

pub async fn create(db: &PgPool, answer: &Answer) -> anyhow::Result<Answer> {
    let row = sqlx::query_as::<_, Answer>(
        r#"
        INSERT INTO answers (id, problem_id, author_id, parent_id, content)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, problem_id, author_id, parent_id, content, created_at
        "#,
    )
    .bind(answer.id)
    .bind(answer.problem_id)
    .bind(answer.author_id)
    .bind(answer.parent_id)
    .bind(&answer.content)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn find_by_id(db: &PgPool, id: i64) -> anyhow::Result<Option<Answer>> {
    let row = sqlx::query_as::<_, Answer>(
        r#"
        SELECT id, problem_id, author_id, parent_id, content, created_at
        FROM answers
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

/// Answers for a problem, newest first.
pub async fn list_by_problem(
    db: &PgPool,
    problem_id: i64,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<Answer>> {
    let rows = sqlx::query_as::<_, Answer>(
        r#"
        SELECT id, problem_id, author_id, parent_id, content, created_at
        FROM answers
        WHERE problem_id = $1
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(problem_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn update_content(db: &PgPool, id: i64, content: &str) -> anyhow::Result<Option<Answer>> {
    let row = sqlx::query_as::<_, Answer>(
        r#"
        UPDATE answers
        SET content = $2
        WHERE id = $1
        RETURNING id, problem_id, author_id, parent_id, content, created_at
        "#,
    )
    .bind(id)
    .bind(content)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn delete(db: &PgPool, id: i64) -> anyhow::Result<()> {
    sqlx::query(r#"DELETE FROM answers WHERE id = $1"#)
        .bind(id)
        .execute(db)
        .await?;
    Ok(())
}
