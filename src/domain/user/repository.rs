//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{PublicUser, User, UserId};
use crate::domain::DomainError;

/// Repository trait for user storage
///
/// Email uniqueness belongs to the implementation: `create` must fail with
/// `DomainError::Conflict` when the email is already taken. Emails are
/// compared exactly.
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Get a user by ID (public projection)
    async fn find_by_id(&self, id: &UserId) -> Result<Option<PublicUser>, DomainError>;

    /// Get a user by email including the password hash (for login)
    async fn find_credentials_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user
    async fn create(&self, user: User) -> Result<PublicUser, DomainError>;

    /// Delete a user
    async fn delete(&self, id: &UserId) -> Result<bool, DomainError>;

    /// Count users
    async fn count(&self) -> Result<usize, DomainError>;
}
