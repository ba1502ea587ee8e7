//! Authentication API endpoints
//!
//! Registration, login and current-user lookup.

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use tracing::debug;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, DataResponse, Json, TokenResponse};
use crate::domain::user::PublicUser;
use crate::infrastructure::auth::{AuthSession, LoginRequest, RegisterRequest};

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/get-user", get(get_user))
}

/// Register a new user
///
/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state.auth_service.register(request).await?;

    Ok(session_response(session))
}

/// Login with email and password
///
/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state.auth_service.login(request).await?;

    Ok(session_response(session))
}

/// Get the user identified by the `authtoken` header
///
/// GET /api/v1/auth/get-user
pub async fn get_user(RequireUser(user): RequireUser) -> Json<DataResponse<PublicUser>> {
    Json(DataResponse::new(user))
}

fn session_response(session: AuthSession) -> impl IntoResponse {
    debug!(user_id = %session.user.id(), "Issuing token cookie");

    (
        [(header::SET_COOKIE, session.cookie.to_header_value())],
        Json(TokenResponse::new(session.token)),
    )
}
