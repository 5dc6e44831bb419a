use axum::{
    extract::{FromRef, Query, State},
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse, PublicUser, RefreshParams, RegisterRequest},
        password::{hash_password, verify_password},
        repo_types::User,
        tokens::{JwtKeys, TokenError, TokenPair},
    },
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

pub(crate) fn is_valid_username(username: &str) -> bool {
    lazy_static! {
        static ref USERNAME_RE: Regex = Regex::new(r"^[A-Za-z0-9_]{3,32}$").unwrap();
    }
    USERNAME_RE.is_match(username)
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<PublicUser>), (StatusCode, String)> {
    if !is_valid_username(&payload.username) {
        warn!(username = %payload.username, "invalid username");
        return Err((StatusCode::BAD_REQUEST, "Invalid username".into()));
    }

    if payload.password.len() < 8 {
        warn!("password too short");
        return Err((StatusCode::BAD_REQUEST, "Password too short".into()));
    }

    // Ensure the username is not taken
    match User::find_by_username(&state.db, &payload.username).await {
        Ok(Some(_)) => {
            warn!(username = %payload.username, "username already registered");
            return Err((StatusCode::CONFLICT, "Username already registered".into()));
        }
        Ok(None) => {}
        Err(e) => {
            error!(error = %e, "find_by_username failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, "Server busy".into()));
        }
    }

    let hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "hash_password failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, "Server busy".into()));
        }
    };

    let user_id = match state.ids.next_id() {
        Ok(id) => id,
        Err(e) => {
            error!(error = %e, "id generation failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, "Server busy".into()));
        }
    };

    let user = match User::create(&state.db, user_id, &payload.username, &hash).await {
        Ok(u) => u,
        Err(e) => {
            error!(error = %e, "create user failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, "Server busy".into()));
        }
    };

    info!(user_id = user.id, username = %user.username, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(PublicUser {
            user_id: user.id,
            username: user.username,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, (StatusCode, String)> {
    let user = match User::find_by_username(&state.db, &payload.username).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(username = %payload.username, "login unknown username");
            return Err((StatusCode::UNAUTHORIZED, "Invalid credentials".into()));
        }
        Err(e) => {
            error!(error = %e, "find_by_username failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, "Server busy".into()));
        }
    };

    let ok = match verify_password(&payload.password, &user.password_hash) {
        Ok(v) => v,
        Err(e) => {
            error!(error = %e, "verify_password failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, "Server busy".into()));
        }
    };

    if !ok {
        warn!(username = %payload.username, user_id = user.id, "login invalid password");
        return Err((StatusCode::UNAUTHORIZED, "Invalid credentials".into()));
    }

    let keys = JwtKeys::from_ref(&state);
    let pair = match keys.issue_pair(user.id as u64, &user.username) {
        Ok(p) => p,
        Err(e) => {
            error!(error = %e, "token issue failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, "Server busy".into()));
        }
    };

    info!(user_id = user.id, username = %user.username, "user logged in");
    Ok(Json(LoginResponse {
        user_id: user.id.to_string(),
        username: user.username,
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
    }))
}

/// Renew an access token. The expired access token arrives as
/// `Authorization: Bearer <token>`, the refresh token as a query parameter.
#[instrument(skip(state, params, headers))]
pub async fn refresh(
    State(state): State<AppState>,
    Query(params): Query<RefreshParams>,
    headers: HeaderMap,
) -> Result<Json<TokenPair>, (StatusCode, String)> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or((
            StatusCode::UNAUTHORIZED,
            "Missing Authorization header".to_string(),
        ))?;

    let access_token = auth_header.strip_prefix("Bearer ").ok_or((
        StatusCode::UNAUTHORIZED,
        "Invalid Authorization header".to_string(),
    ))?;

    let keys = JwtKeys::from_ref(&state);
    match keys.refresh_pair(access_token, &params.refresh_token) {
        Ok(pair) => {
            info!("token pair renewed");
            Ok(Json(pair))
        }
        Err(e @ (TokenError::RefreshInvalid | TokenError::AccessTokenMalformed)) => {
            warn!(error = %e, "token refresh rejected");
            Err((StatusCode::UNAUTHORIZED, e.to_string()))
        }
        Err(e) => {
            error!(error = %e, "token refresh failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Server busy".into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_validation_accepts_reasonable_names() {
        assert!(is_valid_username("alice"));
        assert!(is_valid_username("bob_42"));
        assert!(is_valid_username("ABC"));
    }

    #[test]
    fn username_validation_rejects_bad_shapes() {
        assert!(!is_valid_username(""));
        assert!(!is_valid_username("ab"));
        assert!(!is_valid_username("has spaces"));
        assert!(!is_valid_username("way_too_long_for_a_username_field_honestly"));
        assert!(!is_valid_username("no@symbols"));
    }
}
