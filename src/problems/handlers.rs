use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::auth::extractors::AuthUser;
use crate::problems::dto::{CreateProblemRequest, Pagination, ProblemDetails, UpdateProblemRequest};
use crate::problems::{repo, services};
use crate::state::AppState;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/problems", get(list_problems))
        .route("/problems/:id", get(get_problem))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/problems", post(create_problem))
        .route("/problems/:id", put(update_problem))
        .route("/problems/:id", delete(delete_problem))
}

fn validate(req: &CreateProblemRequest) -> Result<(), (StatusCode, String)> {
    if req.title.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Title must not be empty".into()));
    }
    if req.content.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Content must not be empty".into()));
    }
    if req.community_id == 0 {
        return Err((StatusCode::BAD_REQUEST, "Community must be specified".into()));
    }
    if req.input.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Input must not be empty".into()));
    }
    if req.output.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Output must not be empty".into()));
    }
    Ok(())
}

#[instrument(skip(state, payload))]
pub async fn create_problem(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateProblemRequest>,
) -> Result<(StatusCode, Json<ProblemDetails>), (StatusCode, String)> {
    validate(&payload)?;

    match services::create_problem(&state, user_id, payload).await {
        Ok(details) => {
            info!(problem_id = details.problem.id, author_id = user_id, "problem created");
            Ok((StatusCode::CREATED, Json(details)))
        }
        Err(e) => {
            error!(error = %e, "create problem failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Server busy".into()))
        }
    }
}

#[instrument(skip(state))]
pub async fn list_problems(
    State(state): State<AppState>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<ProblemDetails>>, (StatusCode, String)> {
    let (limit, offset) = p.limit_offset();
    match services::list_problems(&state.db, limit, offset).await {
        Ok(details) => Ok(Json(details)),
        Err(e) => {
            error!(error = %e, "list problems failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Server busy".into()))
        }
    }
}

#[instrument(skip(state))]
pub async fn get_problem(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProblemDetails>, (StatusCode, String)> {
    match services::get_problem(&state.db, id).await {
        Ok(Some(details)) => Ok(Json(details)),
        Ok(None) => Err((StatusCode::NOT_FOUND, "Problem not found".into())),
        Err(e) => {
            error!(error = %e, %id, "get problem failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Server busy".into()))
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn update_problem(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateProblemRequest>,
) -> Result<Json<ProblemDetails>, (StatusCode, String)> {
    let existing = match repo::find_by_id(&state.db, id).await {
        Ok(Some(p)) => p,
        Ok(None) => return Err((StatusCode::NOT_FOUND, "Problem not found".into())),
        Err(e) => {
            error!(error = %e, %id, "load problem failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, "Server busy".into()));
        }
    };

    if existing.author_id != user_id {
        warn!(problem_id = id, user_id, "update rejected: not the author");
        return Err((StatusCode::FORBIDDEN, "Only the author may update".into()));
    }

    if let Err(e) = repo::update(&state.db, id, &payload).await {
        error!(error = %e, %id, "update problem failed");
        return Err((StatusCode::INTERNAL_SERVER_ERROR, "Server busy".into()));
    }

    match services::get_problem(&state.db, id).await {
        Ok(Some(details)) => Ok(Json(details)),
        Ok(None) => Err((StatusCode::NOT_FOUND, "Problem not found".into())),
        Err(e) => {
            error!(error = %e, %id, "reload problem failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Server busy".into()))
        }
    }
}

#[instrument(skip(state))]
pub async fn delete_problem(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    let existing = match repo::find_by_id(&state.db, id).await {
        Ok(Some(p)) => p,
        Ok(None) => return Err((StatusCode::NOT_FOUND, "Problem not found".into())),
        Err(e) => {
            error!(error = %e, %id, "load problem failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, "Server busy".into()));
        }
    };

    if existing.author_id != user_id {
        warn!(problem_id = id, user_id, "delete rejected: not the author");
        return Err((StatusCode::FORBIDDEN, "Only the author may delete".into()));
    }

    if let Err(e) = repo::delete(&state.db, id).await {
        error!(error = %e, %id, "delete problem failed");
        return Err((StatusCode::INTERNAL_SERVER_ERROR, "Server busy".into()));
    }

    info!(problem_id = id, user_id, "problem deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateProblemRequest {
        CreateProblemRequest {
            community_id: 1,
            title: "Two Sum".into(),
            content: "Find indices of two numbers adding to target.".into(),
            input: "4\n2 7 11 15\n9".into(),
            output: "0 1".into(),
        }
    }

    #[test]
    fn validate_accepts_a_complete_request() {
        assert!(validate(&request()).is_ok());
    }

    #[test]
    fn validate_rejects_blank_fields() {
        let mut req = request();
        req.title = "   ".into();
        let (status, _) = validate(&req).unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let mut req = request();
        req.community_id = 0;
        assert!(validate(&req).is_err());

        let mut req = request();
        req.output = String::new();
        assert!(validate(&req).is_err());
    }
}
