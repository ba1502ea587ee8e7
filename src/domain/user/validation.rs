//! User validation utilities

use thiserror::Error;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("Please add a name")]
    EmptyName,

    #[error("Name can not be more than {0} characters")]
    NameTooLong(usize),

    #[error("Please add an email")]
    EmptyEmail,

    #[error("Please add a valid email")]
    InvalidEmail,

    #[error("Please add a password")]
    EmptyPassword,

    #[error("Password is too short. Minimum length is {0} characters")]
    PasswordTooShort(usize),

    #[error("Role '{0}' is not supported. Expected one of: user, publisher")]
    InvalidRole(String),

    #[error("User ID '{0}' is not a valid identifier")]
    InvalidId(String),
}

const MAX_NAME_LENGTH: usize = 50;
const MIN_PASSWORD_LENGTH: usize = 6;

/// Validate a user ID
///
/// User IDs are UUIDs in their hyphenated string form.
pub fn validate_user_id(id: &str) -> Result<(), UserValidationError> {
    uuid::Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| UserValidationError::InvalidId(id.to_string()))
}

/// Validate a display name
///
/// Rules:
/// - Cannot be empty or whitespace only
/// - Maximum 50 characters
pub fn validate_name(name: &str) -> Result<(), UserValidationError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(UserValidationError::EmptyName);
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(UserValidationError::NameTooLong(MAX_NAME_LENGTH));
    }

    Ok(())
}

/// Validate an email address
///
/// Only the shape is checked: a single `@`, a non-empty local part and a
/// dotted domain without whitespace. Deliverability is not our concern.
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if email.trim().is_empty() {
        return Err(UserValidationError::EmptyEmail);
    }

    if email.chars().any(char::is_whitespace) {
        return Err(UserValidationError::InvalidEmail);
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or(UserValidationError::InvalidEmail)?;

    if local.is_empty() || domain.contains('@') {
        return Err(UserValidationError::InvalidEmail);
    }

    let labels: Vec<&str> = domain.split('.').collect();

    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(UserValidationError::InvalidEmail);
    }

    Ok(())
}

/// Validate a password
///
/// Rules:
/// - Cannot be empty
/// - Minimum 6 characters
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.is_empty() {
        return Err(UserValidationError::EmptyPassword);
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }

    Ok(())
}
