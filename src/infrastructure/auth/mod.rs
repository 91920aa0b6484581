//! Credential and session token primitives.
//!
//! - [`jwt`] - [`TokenProvider`] trait and its HS256 JWT implementation
//! - [`password`] - [`PasswordHasher`] trait and its Argon2 implementation

pub mod jwt;
pub mod password;

pub use jwt::{JwtConfig, JwtTokenProvider, TokenClaims, TokenError, TokenKind, TokenProvider};
pub use password::{Argon2Hasher, PasswordHasher};

#[cfg(test)]
pub use jwt::MockTokenProvider;
#[cfg(test)]
pub use password::MockPasswordHasher;
