use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{error, instrument};

use crate::communities::repo;
use crate::communities::repo_types::{Community, CommunityDetail};
use crate::state::AppState;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/communities", get(list_communities))
        .route("/communities/:id", get(get_community))
}

#[instrument(skip(state))]
pub async fn list_communities(
    State(state): State<AppState>,
) -> Result<Json<Vec<Community>>, (StatusCode, String)> {
    match repo::list(&state.db).await {
        Ok(communities) => Ok(Json(communities)),
        Err(e) => {
            error!(error = %e, "list communities failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Server busy".into()))
        }
    }
}

#[instrument(skip(state))]
pub async fn get_community(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CommunityDetail>, (StatusCode, String)> {
    match repo::find_by_id(&state.db, id).await {
        Ok(Some(community)) => Ok(Json(community)),
        Ok(None) => Err((StatusCode::NOT_FOUND, "Community not found".into())),
        Err(e) => {
            error!(error = %e, %id, "get community failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Server busy".into()))
        }
    }
}
