//! User authentication extractor reading the `authtoken` header

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::user::PublicUser;

/// Header carrying the token on private routes
pub const AUTH_TOKEN_HEADER: &str = "authtoken";

/// Extractor that requires a valid token and resolves its user
#[derive(Debug, Clone)]
pub struct RequireUser(pub PublicUser);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_auth_token(&parts.headers);

        debug!(present = token.is_some(), "Resolving user from token");

        let user = state.auth_service.current_user(token).await?;

        Ok(RequireUser(user))
    }
}

/// Read the raw token from the `authtoken` header
///
/// Non-UTF-8 values are treated as absent.
pub fn extract_auth_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTH_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_token() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTH_TOKEN_HEADER, "eyJhbGciOiJIUzI1NiJ9.test".parse().unwrap());

        assert_eq!(extract_auth_token(&headers), Some("eyJhbGciOiJIUzI1NiJ9.test"));
    }

    #[test]
    fn test_missing_token() {
        assert_eq!(extract_auth_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_blank_token() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTH_TOKEN_HEADER, "   ".parse().unwrap());

        assert_eq!(extract_auth_token(&headers), None);
    }

    #[test]
    fn test_trimmed_token() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTH_TOKEN_HEADER, "  token-with-spaces  ".parse().unwrap());

        assert_eq!(extract_auth_token(&headers), Some("token-with-spaces"));
    }

    #[test]
    fn test_bearer_header_is_not_read() {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc"),
        );

        assert_eq!(extract_auth_token(&headers), None);
    }
}
