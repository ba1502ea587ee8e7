//! API middleware components

pub mod logging;
pub mod timeout;
pub mod user_auth;

pub use logging::logging_middleware;
pub use timeout::timeout_envelope_middleware;
pub use user_auth::{extract_auth_token, RequireUser, AUTH_TOKEN_HEADER};
