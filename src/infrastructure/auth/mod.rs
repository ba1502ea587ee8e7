//! Authentication infrastructure module
//!
//! This module provides token signing, the token cookie and the auth service
//! that drives registration, login and current-user lookup.

mod cookie;
mod jwt;
mod service;

pub use cookie::{TokenCookie, TOKEN_COOKIE_NAME};
pub use jwt::{IssuedToken, JwtClaims, JwtConfig, JwtGenerator, JwtService, TokenError};
pub use service::{AuthService, AuthSession, LoginRequest, RegisterRequest};
