//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{PublicUser, User, UserId, UserRepository};
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<String, User>,
    /// Index for email -> user ID lookup
    email_index: HashMap<String, String>,
}

/// In-memory implementation of UserRepository
///
/// Both maps live behind one lock so the uniqueness check and the insert in
/// `create` happen atomically.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<PublicUser>, DomainError> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(id.as_str()).map(User::to_public))
    }

    async fn find_credentials_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let inner = self.inner.read().await;

        Ok(inner
            .email_index
            .get(email)
            .and_then(|id| inner.users.get(id))
            .cloned())
    }

    async fn create(&self, user: User) -> Result<PublicUser, DomainError> {
        let mut inner = self.inner.write().await;
        let id = user.id().as_str().to_string();

        if inner.email_index.contains_key(user.email()) {
            return Err(DomainError::conflict(format!(
                "Email '{}' is already registered",
                user.email()
            )));
        }

        if inner.users.contains_key(&id) {
            return Err(DomainError::conflict(format!(
                "User with ID '{}' already exists",
                id
            )));
        }

        let public = user.to_public();
        inner.email_index.insert(user.email().to_string(), id.clone());
        inner.users.insert(id, user);

        Ok(public)
    }

    async fn delete(&self, id: &UserId) -> Result<bool, DomainError> {
        let mut inner = self.inner.write().await;

        match inner.users.remove(id.as_str()) {
            Some(user) => {
                inner.email_index.remove(user.email());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.inner.read().await.users.len())
    }
}
