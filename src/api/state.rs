//! Application state for shared services

use std::sync::Arc;

use crate::domain::auth::AuthError;
use crate::domain::user::{PublicUser, UserRepository};
use crate::infrastructure::auth::{AuthService, AuthSession, LoginRequest, RegisterRequest};
use crate::infrastructure::user::PasswordHasher;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServiceTrait>,
}

impl AppState {
    pub fn new(auth_service: Arc<dyn AuthServiceTrait>) -> Self {
        Self { auth_service }
    }
}

/// Trait for auth service operations
#[async_trait::async_trait]
pub trait AuthServiceTrait: Send + Sync {
    async fn register(&self, request: RegisterRequest) -> Result<AuthSession, AuthError>;
    async fn login(&self, request: LoginRequest) -> Result<AuthSession, AuthError>;
    async fn current_user(&self, token: Option<&str>) -> Result<PublicUser, AuthError>;
    async fn count_users(&self) -> Result<usize, AuthError>;
}

#[async_trait::async_trait]
impl<R, H> AuthServiceTrait for AuthService<R, H>
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn register(&self, request: RegisterRequest) -> Result<AuthSession, AuthError> {
        AuthService::register(self, request).await
    }

    async fn login(&self, request: LoginRequest) -> Result<AuthSession, AuthError> {
        AuthService::login(self, request).await
    }

    async fn current_user(&self, token: Option<&str>) -> Result<PublicUser, AuthError> {
        AuthService::current_user(self, token).await
    }

    async fn count_users(&self) -> Result<usize, AuthError> {
        AuthService::count_users(self).await
    }
}
