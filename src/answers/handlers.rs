use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::answers::dto::{CreateAnswerRequest, UpdateAnswerRequest};
use crate::answers::repo;
use crate::answers::repo_types::Answer;
use crate::auth::extractors::AuthUser;
use crate::problems::dto::Pagination;
use crate::state::AppState;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/problems/:id/answers", get(list_answers))
        .route("/answers/:id", get(get_answer))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/answers", post(create_answer))
        .route("/answers/:id", put(update_answer))
        .route("/answers/:id", delete(delete_answer))
}

#[instrument(skip(state, payload))]
pub async fn create_answer(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateAnswerRequest>,
) -> Result<(StatusCode, Json<Answer>), (StatusCode, String)> {
    if payload.content.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Content must not be empty".into()));
    }

    let id = match state.ids.next_id() {
        Ok(id) => id,
        Err(e) => {
            error!(error = %e, "id generation failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, "Server busy".into()));
        }
    };

    let answer = Answer {
        id,
        problem_id: payload.problem_id,
        author_id: user_id,
        parent_id: payload.parent_id,
        content: payload.content,
        created_at: time::OffsetDateTime::now_utc(),
    };

    match repo::create(&state.db, &answer).await {
        Ok(created) => {
            info!(answer_id = created.id, problem_id = created.problem_id, "answer created");
            Ok((StatusCode::CREATED, Json(created)))
        }
        Err(e) => {
            error!(error = %e, "create answer failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Server busy".into()))
        }
    }
}

#[instrument(skip(state))]
pub async fn list_answers(
    State(state): State<AppState>,
    Path(problem_id): Path<i64>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<Answer>>, (StatusCode, String)> {
    let (limit, offset) = p.limit_offset();
    match repo::list_by_problem(&state.db, problem_id, limit, offset).await {
        Ok(answers) => Ok(Json(answers)),
        Err(e) => {
            error!(error = %e, %problem_id, "list answers failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Server busy".into()))
        }
    }
}

#[instrument(skip(state))]
pub async fn get_answer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Answer>, (StatusCode, String)> {
    match repo::find_by_id(&state.db, id).await {
        Ok(Some(answer)) => Ok(Json(answer)),
        Ok(None) => Err((StatusCode::NOT_FOUND, "Answer not found".into())),
        Err(e) => {
            error!(error = %e, %id, "get answer failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Server busy".into()))
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn update_answer(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateAnswerRequest>,
) -> Result<Json<Answer>, (StatusCode, String)> {
    if payload.content.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Content must not be empty".into()));
    }

    let existing = match repo::find_by_id(&state.db, id).await {
        Ok(Some(a)) => a,
        Ok(None) => return Err((StatusCode::NOT_FOUND, "Answer not found".into())),
        Err(e) => {
            error!(error = %e, %id, "load answer failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, "Server busy".into()));
        }
    };

    if existing.author_id != user_id {
        warn!(answer_id = id, user_id, "update rejected: not the author");
        return Err((StatusCode::FORBIDDEN, "Only the author may update".into()));
    }

    match repo::update_content(&state.db, id, &payload.content).await {
        Ok(Some(answer)) => Ok(Json(answer)),
        Ok(None) => Err((StatusCode::NOT_FOUND, "Answer not found".into())),
        Err(e) => {
            error!(error = %e, %id, "update answer failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Server busy".into()))
        }
    }
}

#[instrument(skip(state))]
pub async fn delete_answer(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    let existing = match repo::find_by_id(&state.db, id).await {
        Ok(Some(a)) => a,
        Ok(None) => return Err((StatusCode::NOT_FOUND, "Answer not found".into())),
        Err(e) => {
            error!(error = %e, %id, "load answer failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, "Server busy".into()));
        }
    };

    if existing.author_id != user_id {
        warn!(answer_id = id, user_id, "delete rejected: not the author");
        return Err((StatusCode::FORBIDDEN, "Only the author may delete".into()));
    }

    if let Err(e) = repo::delete(&state.db, id).await {
        error!(error = %e, %id, "delete answer failed");
        return Err((StatusCode::INTERNAL_SERVER_ERROR, "Server busy".into()));
    }

    info!(answer_id = id, user_id, "answer deleted");
    Ok(StatusCode::NO_CONTENT)
}
