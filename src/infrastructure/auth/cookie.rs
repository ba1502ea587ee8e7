//! Token cookie directive

use chrono::{DateTime, Utc};

/// Name of the cookie carrying the token
pub const TOKEN_COOKIE_NAME: &str = "token";

/// Instruction to store the token as an `HttpOnly` cookie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenCookie {
    pub value: String,
    pub expires: DateTime<Utc>,
    pub secure: bool,
}

impl TokenCookie {
    pub fn new(value: impl Into<String>, expires: DateTime<Utc>, secure: bool) -> Self {
        Self {
            value: value.into(),
            expires,
            secure,
        }
    }

    /// Render as a `Set-Cookie` header value
    pub fn to_header_value(&self) -> String {
        let mut cookie = format!(
            "{}={}; Path=/; Expires={}; HttpOnly",
            TOKEN_COOKIE_NAME,
            self.value,
            self.expires.format("%a, %d %b %Y %H:%M:%S GMT")
        );

        // Only mark cookies secure in production deployments
        if self.secure {
            cookie.push_str("; Secure");
        }

        cookie
    }
}
