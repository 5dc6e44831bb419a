use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;

use crate::config::JwtConfig;
use crate::state::AppState;

/// Identity payload carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: u64,
    pub username: String,
    pub exp: usize, // expires at (unix timestamp)
    pub iss: String,
}

/// Payload of a refresh token: an expiry window and nothing else. A refresh
/// token identifies nobody and can only be traded, together with the old
/// access token, for a new pair.
#[derive(Debug, Serialize, Deserialize)]
struct RefreshClaims {
    exp: usize,
    iss: String,
}

#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token signature mismatch")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("refresh token invalid or expired")]
    RefreshInvalid,
    #[error("access token malformed")]
    AccessTokenMalformed,
    #[error("token signing failed: {0}")]
    Sign(#[source] jsonwebtoken::errors::Error),
}

/// Signing/verification keys plus the expiry policy, built once per request
/// from the process-wide config.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let JwtConfig {
            secret,
            issuer,
            access_ttl_hours,
            refresh_ttl_seconds,
        } = state.config.jwt.clone();
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            access_ttl: Duration::from_secs((access_ttl_hours as u64) * 3600),
            refresh_ttl: Duration::from_secs(refresh_ttl_seconds as u64),
        }
    }
}

impl JwtKeys {
    fn validation(&self, enforce_exp: bool) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        // Zero leeway: a token is expired the second its exp passes.
        validation.leeway = 0;
        validation.validate_exp = enforce_exp;
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        validation
    }

    fn decode_error(err: jsonwebtoken::errors::Error) -> TokenError {
        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            _ => TokenError::Malformed,
        }
    }

    /// Mint a fresh access/refresh pair for the given identity. Both tokens
    /// are signed with the same secret but expire independently.
    pub fn issue_pair(&self, user_id: u64, username: &str) -> Result<TokenPair, TokenError> {
        let now = OffsetDateTime::now_utc();
        let access_exp = now + TimeDuration::seconds(self.access_ttl.as_secs() as i64);
        let refresh_exp = now + TimeDuration::seconds(self.refresh_ttl.as_secs() as i64);

        let claims = Claims {
            user_id,
            username: username.to_owned(),
            exp: access_exp.unix_timestamp() as usize,
            iss: self.issuer.clone(),
        };
        let access_token =
            encode(&Header::default(), &claims, &self.encoding).map_err(TokenError::Sign)?;

        let refresh_claims = RefreshClaims {
            exp: refresh_exp.unix_timestamp() as usize,
            iss: self.issuer.clone(),
        };
        let refresh_token =
            encode(&Header::default(), &refresh_claims, &self.encoding).map_err(TokenError::Sign)?;

        debug!(user_id, username, "token pair issued");
        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Verify and decode an access token. With `enforce_exp` off the claims
    /// of an expired token are still recovered; signature and issuer are
    /// checked either way.
    pub fn decode_access(&self, token: &str, enforce_exp: bool) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation(enforce_exp))
            .map_err(Self::decode_error)?;
        Ok(data.claims)
    }

    fn decode_refresh(&self, token: &str) -> Result<(), TokenError> {
        decode::<RefreshClaims>(token, &self.decoding, &self.validation(true))
            .map_err(Self::decode_error)?;
        Ok(())
    }

    /// Trade an old access token plus a live refresh token for a brand-new
    /// pair.
    ///
    /// The refresh token must verify with expiry enforced; any failure there
    /// means the caller has to log in again. The old access token only has to
    /// be structurally intact: its claims are recovered with expiry
    /// enforcement off, so an expired (or still-live) token is eligible while
    /// a tampered or garbled one is rejected.
    pub fn refresh_pair(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<TokenPair, TokenError> {
        self.decode_refresh(refresh_token)
            .map_err(|_| TokenError::RefreshInvalid)?;

        let claims = self
            .decode_access(access_token, false)
            .map_err(|_| TokenError::AccessTokenMalformed)?;

        debug!(user_id = claims.user_id, "access token renewed");
        self.issue_pair(claims.user_id, &claims.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys(secret: &str) -> JwtKeys {
        JwtKeys {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer: "test-issuer".into(),
            access_ttl: Duration::from_secs(2 * 3600),
            refresh_ttl: Duration::from_secs(30),
        }
    }

    fn expired_access_token(secret: &str, user_id: u64, username: &str) -> String {
        let exp = (OffsetDateTime::now_utc() - TimeDuration::hours(1)).unix_timestamp() as usize;
        let claims = Claims {
            user_id,
            username: username.into(),
            exp,
            iss: "test-issuer".into(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("encode expired access token")
    }

    fn expired_refresh_token(secret: &str) -> String {
        let claims = RefreshClaims {
            exp: (OffsetDateTime::now_utc() - TimeDuration::hours(1)).unix_timestamp() as usize,
            iss: "test-issuer".into(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("encode expired refresh token")
    }

    #[tokio::test]
    async fn keys_derive_from_app_state_config() {
        let state = AppState::fake();
        let keys = JwtKeys::from_ref(&state);
        let pair = keys.issue_pair(1, "bob").expect("issue pair");
        let claims = keys.decode_access(&pair.access_token, true).expect("decode");
        assert_eq!(claims.iss, "test-issuer");
    }

    #[test]
    fn round_trip_preserves_identity() {
        let keys = make_keys("dev-secret");
        let pair = keys.issue_pair(42, "alice").expect("issue pair");
        let claims = keys.decode_access(&pair.access_token, true).expect("decode");
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.iss, "test-issuer");
    }

    #[test]
    fn wrong_secret_fails_with_invalid_signature() {
        let keys = make_keys("secret-one");
        let other = make_keys("secret-two");
        let pair = keys.issue_pair(7, "bob").expect("issue pair");
        let err = other.decode_access(&pair.access_token, true).unwrap_err();
        assert!(matches!(err, TokenError::InvalidSignature));
    }

    #[test]
    fn expired_token_fails_only_when_enforced() {
        let keys = make_keys("dev-secret");
        let token = expired_access_token("dev-secret", 42, "alice");

        let err = keys.decode_access(&token, true).unwrap_err();
        assert!(matches!(err, TokenError::Expired));

        let claims = keys
            .decode_access(&token, false)
            .expect("expired claims should still decode without enforcement");
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.username, "alice");
    }

    #[test]
    fn refresh_token_does_not_decode_as_access_token() {
        let keys = make_keys("dev-secret");
        let pair = keys.issue_pair(42, "alice").expect("issue pair");
        // Refresh tokens carry no identity claims, so decoding one as an
        // access token must fail.
        let err = keys.decode_access(&pair.refresh_token, true).unwrap_err();
        assert!(matches!(err, TokenError::Malformed));
    }

    #[test]
    fn refresh_with_fresh_pair_succeeds() {
        let keys = make_keys("dev-secret");
        let pair = keys.issue_pair(42, "alice").expect("issue pair");
        // Renewal is gated on the refresh token being live and the access
        // token decoding, not on the access token having already expired.
        let renewed = keys
            .refresh_pair(&pair.access_token, &pair.refresh_token)
            .expect("refresh should succeed for a fresh pair");
        let claims = keys
            .decode_access(&renewed.access_token, true)
            .expect("decode renewed access token");
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.username, "alice");
    }

    #[test]
    fn refresh_renews_an_expired_access_token() {
        let keys = make_keys("dev-secret");
        let pair = keys.issue_pair(42, "alice").expect("issue pair");
        let stale = expired_access_token("dev-secret", 42, "alice");
        let renewed = keys
            .refresh_pair(&stale, &pair.refresh_token)
            .expect("refresh should renew an expired access token");
        let claims = keys
            .decode_access(&renewed.access_token, true)
            .expect("decode renewed access token");
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.username, "alice");
    }

    #[test]
    fn refresh_with_expired_refresh_token_fails() {
        let keys = make_keys("dev-secret");
        let stale_access = expired_access_token("dev-secret", 42, "alice");
        let stale_refresh = expired_refresh_token("dev-secret");
        let err = keys.refresh_pair(&stale_access, &stale_refresh).unwrap_err();
        assert!(matches!(err, TokenError::RefreshInvalid));
    }

    #[test]
    fn refresh_with_garbage_access_token_fails() {
        let keys = make_keys("dev-secret");
        let pair = keys.issue_pair(42, "alice").expect("issue pair");
        let err = keys
            .refresh_pair("not-a-token", &pair.refresh_token)
            .unwrap_err();
        assert!(matches!(err, TokenError::AccessTokenMalformed));
    }

    #[test]
    fn refresh_with_foreign_access_token_fails() {
        let keys = make_keys("dev-secret");
        let other = make_keys("other-secret");
        let pair = keys.issue_pair(42, "alice").expect("issue pair");
        let foreign = other.issue_pair(42, "alice").expect("issue pair");
        let err = keys
            .refresh_pair(&foreign.access_token, &pair.refresh_token)
            .unwrap_err();
        assert!(matches!(err, TokenError::AccessTokenMalformed));
    }

    #[test]
    fn wrong_issuer_is_rejected() {
        let keys = make_keys("dev-secret");
        let claims = Claims {
            user_id: 42,
            username: "alice".into(),
            exp: (OffsetDateTime::now_utc() + TimeDuration::hours(1)).unix_timestamp() as usize,
            iss: "someone-else".into(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"dev-secret"),
        )
        .expect("encode");
        let err = keys.decode_access(&token, true).unwrap_err();
        assert!(matches!(err, TokenError::Malformed));
    }
}
