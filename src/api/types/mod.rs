//! API request and response types

pub mod error;
pub mod json;

use serde::{Deserialize, Serialize};

pub use error::{ApiError, ErrorBody};
pub use json::Json;

/// Success body carrying a token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub success: bool,
    pub token: String,
}

impl TokenResponse {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            success: true,
            token: token.into(),
        }
    }
}

/// Success body carrying a payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
