//! Authentication domain module

mod error;

pub use error::AuthError;
