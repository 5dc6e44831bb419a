use axum::Router;

use crate::state::AppState;

pub mod handlers;
pub(crate) mod repo;
pub mod repo_types;

pub fn router() -> Router<AppState> {
    handlers::read_routes()
}
