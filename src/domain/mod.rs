//! Domain layer - Core entities, errors and store traits

pub mod auth;
pub mod error;
pub mod user;

pub use error::DomainError;
