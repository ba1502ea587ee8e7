use std::time::Duration;

use axum::{middleware, routing::get, Router};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use super::auth;
use super::health;
use super::middleware::{logging_middleware, timeout_envelope_middleware};
use super::state::AppState;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        // Authentication endpoints
        .nest("/api/v1/auth", auth::create_auth_router())
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(middleware::from_fn(timeout_envelope_middleware))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::infrastructure::auth::{AuthService, JwtConfig, JwtService};
    use crate::infrastructure::user::{Argon2Hasher, HashParams, InMemoryUserRepository};

    fn create_app() -> Router {
        let service = AuthService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(Argon2Hasher::with_params(HashParams::new(64, 1, 1)).unwrap()),
            Arc::new(JwtService::new(JwtConfig::new("router-test-secret", 30)).unwrap()),
        );

        create_router_with_state(AppState::new(Arc::new(service)), Duration::from_secs(5))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_user(token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri("/api/v1/auth/get-user");

        if let Some(token) = token {
            builder = builder.header("authtoken", token);
        }

        builder.body(Body::empty()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn register_body() -> Value {
        json!({"name": "A", "email": "a@x.com", "password": "secret123"})
    }

    #[tokio::test]
    async fn test_register_login_get_user_flow() {
        let app = create_app();

        let response = app
            .clone()
            .oneshot(post_json("/api/v1/auth/register", register_body()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert!(cookie.starts_with(&format!("token={}", body["token"].as_str().unwrap())));
        assert!(cookie.contains("HttpOnly"));
        assert!(!cookie.contains("Secure"));

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/auth/login",
                json!({"email": "a@x.com", "password": "secret123"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(header::SET_COOKIE));
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        let token = body["token"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/auth/login",
                json!({"email": "a@x.com", "password": "wrong"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Invalid credentials");

        let response = app.oneshot(get_user(Some(&token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["email"], "a@x.com");
        assert_eq!(body["data"]["name"], "A");
        assert_eq!(body["data"]["role"], "user");
        assert!(body["data"].get("password").is_none());
        assert!(body["data"].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_conflict() {
        let app = create_app();

        let first = app
            .clone()
            .oneshot(post_json("/api/v1/auth/register", register_body()))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = app
            .oneshot(post_json("/api/v1/auth/register", register_body()))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
        let body = body_json(second).await;
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_register_missing_field_is_bad_request() {
        let app = create_app();

        let response = app
            .oneshot(post_json(
                "/api/v1/auth/register",
                json!({"email": "a@x.com", "password": "secret123"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Please add a name");
    }

    #[tokio::test]
    async fn test_login_missing_field_is_bad_request() {
        let app = create_app();

        let response = app
            .oneshot(post_json("/api/v1/auth/login", json!({"email": "a@x.com"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Please provide an email and password");
    }

    #[tokio::test]
    async fn test_unknown_email_matches_wrong_password() {
        let app = create_app();

        let response = app
            .oneshot(post_json(
                "/api/v1/auth/login",
                json!({"email": "nobody@x.com", "password": "secret123"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Invalid credentials");
    }

    #[tokio::test]
    async fn test_get_user_without_token() {
        let app = create_app();

        let response = app.oneshot(get_user(None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Not authorized to access this route");
    }

    #[tokio::test]
    async fn test_get_user_with_garbage_token() {
        let app = create_app();

        let response = app.oneshot(get_user(Some("garbage"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_body_uses_envelope() {
        let app = create_app();

        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{oops"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_health_reports_store() {
        let app = create_app();

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["checks"][0]["name"], "credential_store");
    }

    #[tokio::test]
    async fn test_live() {
        let app = create_app();

        let response = app
            .oneshot(Request::get("/live").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
