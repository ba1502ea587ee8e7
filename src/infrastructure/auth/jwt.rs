//! JWT token generation and validation

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

use crate::domain::auth::AuthError;
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

impl JwtClaims {
    /// Create claims for a subject issued at `issued_at`
    pub fn new(user_id: &UserId, issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: user_id.as_str().to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Check if the token has expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Get user ID from claims
    pub fn user_id(&self) -> &str {
        &self.sub
    }
}

/// A freshly signed token and its absolute expiry
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Reasons a token is rejected
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("token is invalid: {0}")]
    Invalid(String),
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        AuthError::invalid_token(err.to_string())
    }
}

/// Longest accepted token lifetime in days
pub const MAX_TOKEN_EXPIRE_DAYS: u32 = 3650;

/// Configuration for JWT service
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for HMAC signing
    pub secret: String,
    /// Token lifetime in days
    pub expire_days: u32,
}

impl JwtConfig {
    /// Create new JWT configuration
    pub fn new(secret: impl Into<String>, expire_days: u32) -> Self {
        Self {
            secret: secret.into(),
            expire_days,
        }
    }
}

/// Trait for JWT operations
pub trait JwtGenerator: Send + Sync + Debug {
    /// Sign a token for a user as if issued at `now`
    fn issue_at(&self, user_id: &UserId, now: DateTime<Utc>) -> Result<IssuedToken, DomainError>;

    /// Validate a token against the clock value `now`
    fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenError>;

    /// Sign a token for a user
    fn issue(&self, user_id: &UserId) -> Result<IssuedToken, DomainError> {
        self.issue_at(user_id, Utc::now())
    }

    /// Validate a token and return the claims
    fn validate(&self, token: &str) -> Result<JwtClaims, TokenError> {
        self.validate_at(token, Utc::now())
    }
}

/// HS256 JWT service
#[derive(Clone)]
pub struct JwtService {
    expire_days: u32,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("expire_days", &self.expire_days)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Create a new JWT service with the given configuration
    ///
    /// The lifetime must be between 1 and `MAX_TOKEN_EXPIRE_DAYS` days.
    pub fn new(config: JwtConfig) -> Result<Self, DomainError> {
        if config.expire_days == 0 || config.expire_days > MAX_TOKEN_EXPIRE_DAYS {
            return Err(DomainError::configuration(format!(
                "Token lifetime must be between 1 and {} days, got {}",
                MAX_TOKEN_EXPIRE_DAYS, config.expire_days
            )));
        }

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Ok(Self {
            expire_days: config.expire_days,
            encoding_key,
            decoding_key,
        })
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the caller's clock in validate_at
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation
    }
}

impl JwtGenerator for JwtService {
    fn issue_at(&self, user_id: &UserId, now: DateTime<Utc>) -> Result<IssuedToken, DomainError> {
        let expires_at = now
            .checked_add_signed(Duration::days(i64::from(self.expire_days)))
            .ok_or_else(|| DomainError::internal("Token expiry is out of range"))?;
        let claims = JwtClaims::new(user_id, now, expires_at);

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to generate JWT: {}", e)))?;

        Ok(IssuedToken { token, expires_at })
    }

    fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenError> {
        let token_data = decode::<JwtClaims>(token, &self.decoding_key, &Self::validation())
            .map_err(|e| TokenError::Invalid(e.to_string()))?;

        if token_data.claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }

        Ok(token_data.claims)
    }
}
