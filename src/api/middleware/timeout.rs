//! Envelope for requests cut off by the timeout layer

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::api::types::ApiError;

/// Replace the bare 408 produced by `TimeoutLayer` with the error envelope.
///
/// Must be layered outside the timeout layer.
pub async fn timeout_envelope_middleware(request: Request<Body>, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let response = next.run(request).await;

    if response.status() == StatusCode::REQUEST_TIMEOUT
        && !response.headers().contains_key(header::CONTENT_TYPE)
    {
        warn!(path = %path, "Request timed out");
        return ApiError::new(StatusCode::REQUEST_TIMEOUT, "Request timed out").into_response();
    }

    response
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::{body::to_bytes, middleware, routing::get, Router};
    use tower::ServiceExt;
    use tower_http::timeout::TimeoutLayer;

    use super::*;

    fn slow_app() -> Router {
        Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "done"
                }),
            )
            .route("/fast", get(|| async { "done" }))
            .layer(TimeoutLayer::new(Duration::from_millis(20)))
            .layer(middleware::from_fn(timeout_envelope_middleware))
    }

    #[tokio::test]
    async fn test_timeout_uses_envelope() {
        let response = slow_app()
            .oneshot(Request::get("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Request timed out");
    }

    #[tokio::test]
    async fn test_fast_request_untouched() {
        let response = slow_app()
            .oneshot(Request::get("/fast").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"done");
    }
}
