use sqlx::PgPool;
use tracing::warn;

use crate::auth::repo_types::User;
use crate::communities::repo as communities;
use crate::problems::dto::{CreateProblemRequest, ProblemDetails};
use crate::problems::repo;
use crate::problems::repo_types::Problem;
use crate::state::AppState;

pub async fn create_problem(
    state: &AppState,
    author_id: i64,
    req: CreateProblemRequest,
) -> anyhow::Result<ProblemDetails> {
    let id = state.ids.next_id()?;
    let problem = Problem {
        id,
        author_id,
        community_id: req.community_id,
        status: 0,
        title: req.title,
        content: req.content,
        input: req.input,
        output: req.output,
        created_at: time::OffsetDateTime::now_utc(),
    };
    repo::create(&state.db, &problem).await?;

    assemble_details(&state.db, problem)
        .await?
        .ok_or_else(|| anyhow::anyhow!("author or community vanished during problem creation"))
}

/// Join the author's name and the community record onto a problem row.
/// Returns None when either reference is dangling.
async fn assemble_details(db: &PgPool, problem: Problem) -> anyhow::Result<Option<ProblemDetails>> {
    let Some(author) = User::find_by_id(db, problem.author_id).await? else {
        warn!(problem_id = problem.id, author_id = problem.author_id, "problem author missing");
        return Ok(None);
    };
    let Some(community) = communities::find_by_id(db, problem.community_id).await? else {
        warn!(
            problem_id = problem.id,
            community_id = problem.community_id,
            "problem community missing"
        );
        return Ok(None);
    };
    Ok(Some(ProblemDetails {
        problem,
        community,
        author_name: author.username,
    }))
}

pub async fn get_problem(db: &PgPool, id: i64) -> anyhow::Result<Option<ProblemDetails>> {
    let Some(problem) = repo::find_by_id(db, id).await? else {
        return Ok(None);
    };
    assemble_details(db, problem).await
}

/// Paginated problem list with details. Rows whose author or community
/// lookup fails are skipped rather than failing the whole page.
pub async fn list_problems(
    db: &PgPool,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<ProblemDetails>> {
    let problems = repo::list(db, limit, offset).await?;
    let mut details = Vec::with_capacity(problems.len());
    for problem in problems {
        if let Some(d) = assemble_details(db, problem).await? {
            details.push(d);
        }
    }
    Ok(details)
}
