//! Infrastructure layer - Adapters for signing, hashing and storage

pub mod auth;
pub mod logging;
pub mod user;
