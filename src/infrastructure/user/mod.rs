//! User infrastructure module
//!
//! This module provides the credential store adapters and password hashing
//! with Argon2.

mod password;
mod postgres_repository;
mod repository;

pub use password::{Argon2Hasher, HashParams, PasswordHasher};
pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;

#[cfg(test)]
pub use password::MockPasswordHasher;
