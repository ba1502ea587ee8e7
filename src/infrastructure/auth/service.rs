//! Auth service: registration, login and current-user lookup

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::auth::AuthError;
use crate::domain::user::{
    validate_email, validate_name, validate_password, PublicUser, Role, User, UserId,
    UserRepository,
};
use crate::infrastructure::user::PasswordHasher;

use super::cookie::TokenCookie;
use super::jwt::JwtGenerator;

/// Registration input
///
/// Fields are optional so that an absent field is reported as a validation
/// error instead of a body parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

/// Login input
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Result of a successful registration or login
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub cookie: TokenCookie,
    pub user: PublicUser,
}

/// Auth service tying the credential store, hasher and token signer together
#[derive(Debug)]
pub struct AuthService<R: UserRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
    tokens: Arc<dyn JwtGenerator>,
    secure_cookies: bool,
}

impl<R: UserRepository, H: PasswordHasher + 'static> AuthService<R, H> {
    /// Create a new auth service
    pub fn new(repository: Arc<R>, hasher: Arc<H>, tokens: Arc<dyn JwtGenerator>) -> Self {
        Self {
            repository,
            hasher,
            tokens,
            secure_cookies: false,
        }
    }

    /// Mark issued cookies as `Secure`
    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.secure_cookies = secure;
        self
    }

    /// Register a new user and issue a token for it
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthSession, AuthError> {
        let name = request.name.unwrap_or_default().trim().to_string();
        let email = request.email.unwrap_or_default().trim().to_string();
        let password = request.password.unwrap_or_default();

        validate_name(&name)?;
        validate_email(&email)?;
        validate_password(&password)?;

        let role = match request.role.as_deref() {
            Some(role) => role.parse::<Role>()?,
            None => Role::default(),
        };

        let password_hash = self.hash_password(password).await?;

        // Uniqueness is decided by the store
        let user = self
            .repository
            .create(User::new(name, email, password_hash, role))
            .await?;

        info!(user_id = %user.id(), role = %user.role(), "User registered");

        self.issue_session(user)
    }

    /// Authenticate with email and password
    pub async fn login(&self, request: LoginRequest) -> Result<AuthSession, AuthError> {
        let (email, password) = match (non_empty(request.email), non_empty(request.password)) {
            (Some(email), Some(password)) => (email.trim().to_string(), password),
            _ => {
                return Err(AuthError::validation(
                    "Please provide an email and password",
                ))
            }
        };

        let user = match self.repository.find_credentials_by_email(&email).await? {
            Some(user) => user,
            None => {
                debug!("Login rejected: unknown email");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let matches = self
            .verify_password(password, user.password_hash().to_string())
            .await?;

        if !matches {
            debug!(user_id = %user.id(), "Login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        info!(user_id = %user.id(), "User logged in");

        self.issue_session(user.into_public())
    }

    /// Resolve the user behind a token
    ///
    /// A missing token is an error; this lookup never treats the caller as
    /// anonymous.
    pub async fn current_user(&self, token: Option<&str>) -> Result<PublicUser, AuthError> {
        let token = match token.map(str::trim) {
            Some(token) if !token.is_empty() => token,
            _ => return Err(AuthError::invalid_token("no token provided")),
        };

        let claims = self.tokens.validate(token).map_err(|e| {
            debug!(error = %e, "Token rejected");
            AuthError::from(e)
        })?;

        let user_id = UserId::new(claims.user_id())
            .map_err(|_| AuthError::invalid_token("token subject is not a user ID"))?;

        self.repository
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::IdentityNotFound)
    }

    /// Number of registered users
    pub async fn count_users(&self) -> Result<usize, AuthError> {
        Ok(self.repository.count().await?)
    }

    /// Sign a token for a user and build the cookie directive
    pub fn issue_session(&self, user: PublicUser) -> Result<AuthSession, AuthError> {
        let issued = self.tokens.issue(user.id())?;
        let cookie = TokenCookie::new(issued.token.clone(), issued.expires_at, self.secure_cookies);

        Ok(AuthSession {
            token: issued.token,
            cookie,
            user,
        })
    }

    async fn hash_password(&self, password: String) -> Result<String, AuthError> {
        let hasher = Arc::clone(&self.hasher);

        let hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::internal(format!("Password hashing task failed: {}", e)))??;

        Ok(hash)
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, AuthError> {
        let hasher = Arc::clone(&self.hasher);

        let matches = tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| {
                AuthError::internal(format!("Password verification task failed: {}", e))
            })??;

        Ok(matches)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
