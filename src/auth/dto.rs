use serde::{Deserialize, Serialize};

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Query parameters for token refresh; the access token travels in the
/// Authorization header.
#[derive(Debug, Deserialize)]
pub struct RefreshParams {
    pub refresh_token: String,
}

/// Response returned after login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: String, // stringified so JS clients keep 64-bit precision
    pub username: String,
    pub access_token: String,
    pub refresh_token: String,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub user_id: i64,
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_user_serializes_without_secrets() {
        let user = PublicUser {
            user_id: 42,
            username: "alice".into(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("alice"));
        assert!(json.contains("user_id"));
        assert!(!json.contains("password"));
    }

    #[test]
    fn login_response_keeps_user_id_as_string() {
        let response = LoginResponse {
            user_id: 42.to_string(),
            username: "alice".into(),
            access_token: "a".into(),
            refresh_token: "r".into(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""user_id":"42""#));
    }
}
