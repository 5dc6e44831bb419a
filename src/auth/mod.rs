use axum::Router;

use crate::state::AppState;

mod dto;
pub(crate) mod extractors;
pub mod handlers;
pub mod password;
mod repo;
pub mod repo_types;
pub mod tokens;

pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}
