use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
};
use tracing::warn;

use crate::auth::tokens::{JwtKeys, TokenError};

/// Extracts and verifies the Bearer access token, returning the caller's
/// user id.
pub struct AuthUser(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or((
                StatusCode::UNAUTHORIZED,
                "Missing Authorization header".to_string(),
            ))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or((
            StatusCode::UNAUTHORIZED,
            "Invalid Authorization header".to_string(),
        ))?;

        let claims = match keys.decode_access(token, true) {
            Ok(c) => c,
            Err(TokenError::Expired) => {
                // Expired is reported distinctly so clients know to hit the
                // refresh endpoint instead of logging in again.
                return Err((StatusCode::UNAUTHORIZED, "Access token expired".to_string()));
            }
            Err(e) => {
                warn!(error = %e, "invalid access token");
                return Err((StatusCode::UNAUTHORIZED, "Invalid token".to_string()));
            }
        };

        Ok(AuthUser(claims.user_id as i64))
    }
}
