use axum::Router;

use crate::state::AppState;

pub mod dto;
pub mod handlers;
pub(crate) mod repo;
pub mod repo_types;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::read_routes())
        .merge(handlers::write_routes())
}
