//! User domain
//!
//! This module provides domain types and traits for user authentication,
//! including the internal and public user projections, validation, and the
//! repository trait.

mod entity;
mod repository;
mod validation;

pub use entity::{PublicUser, Role, User, UserId};
pub use repository::UserRepository;
pub use validation::{
    validate_email, validate_name, validate_password, validate_user_id, UserValidationError,
};

#[cfg(test)]
pub use repository::mock::MockUserRepository;
