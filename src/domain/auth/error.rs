//! Authentication errors

use thiserror::Error;

use crate::domain::user::UserValidationError;
use crate::domain::DomainError;

/// Errors surfaced by registration, login and token verification
#[derive(Debug, Error)]
pub enum AuthError {
    /// Missing or malformed input
    #[error("{0}")]
    Validation(String),

    /// Unknown email or wrong password. Both cases share this variant.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, malformed, forged or expired token
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Token was valid but its subject no longer exists
    #[error("User not found")]
    IdentityNotFound,

    /// The store rejected the email as already registered
    #[error("{0}")]
    DuplicateIdentity(String),

    /// Unexpected failure in the store or hashing capability
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn invalid_token(reason: impl Into<String>) -> Self {
        Self::InvalidToken(reason.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl From<DomainError> for AuthError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Conflict { message } => Self::DuplicateIdentity(message),
            DomainError::Validation { message } => Self::Validation(message),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<UserValidationError> for AuthError {
    fn from(err: UserValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_maps_to_duplicate_identity() {
        let err: AuthError = DomainError::conflict("Email 'a@x.com' is already registered").into();
        assert!(matches!(err, AuthError::DuplicateIdentity(_)));
        assert_eq!(err.to_string(), "Email 'a@x.com' is already registered");
    }

    #[test]
    fn test_storage_maps_to_internal() {
        let err: AuthError = DomainError::storage("connection refused").into();
        assert!(matches!(err, AuthError::Internal(_)));
    }

    #[test]
    fn test_user_validation_maps_to_validation() {
        let err: AuthError = UserValidationError::EmptyName.into();
        assert!(matches!(err, AuthError::Validation(ref m) if m == "Please add a name"));
    }

    #[test]
    fn test_invalid_credentials_message() {
        assert_eq!(AuthError::InvalidCredentials.to_string(), "Invalid credentials");
    }
}
