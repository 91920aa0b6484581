//! JWT access/refresh token issuing and verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Distinguishes short-lived access tokens from long-lived refresh tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => f.write_str("access"),
            TokenKind::Refresh => f.write_str("refresh"),
        }
    }
}

/// Claims carried by both token kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (member key)
    pub sub: String,
    /// Token kind
    pub typ: TokenKind,
    /// Unique token id
    pub jti: String,
    /// Issued at (Unix epoch seconds)
    pub iat: i64,
    /// Expiration (Unix epoch seconds)
    pub exp: i64,
}

impl TokenClaims {
    fn new(member_key: i64, typ: TokenKind, ttl: Duration) -> Result<Self, TokenError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::Issue {
                kind: typ,
                message: format!("expiry out of range for ttl {}s", ttl.num_seconds()),
            })?;

        Ok(Self {
            sub: member_key.to_string(),
            typ,
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    /// Parses the subject back into a member key.
    pub fn member_key(&self) -> Result<i64, TokenError> {
        self.sub
            .parse()
            .map_err(|_| TokenError::Invalid(format!("malformed subject '{}'", self.sub)))
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to issue {kind} token: {message}")]
    Issue { kind: TokenKind, message: String },

    #[error("invalid token: {0}")]
    Invalid(String),

    #[error("expected {expected} token, got {actual} token")]
    WrongKind {
        expected: TokenKind,
        actual: TokenKind,
    },
}

/// Issues and verifies member session tokens.
#[cfg_attr(test, mockall::automock)]
pub trait TokenProvider: Send + Sync {
    /// Issues a short-lived access token for `member_key`.
    fn create_access_token(&self, member_key: i64) -> Result<String, TokenError>;

    /// Issues a long-lived refresh token for `member_key`.
    fn create_refresh_token(&self, member_key: i64) -> Result<String, TokenError>;

    /// Verifies signature, expiry and kind, returning the claims.
    fn verify(&self, token: &str, kind: TokenKind) -> Result<TokenClaims, TokenError>;

    /// Lifetime of access tokens; also used as the auth cookie `Max-Age`.
    fn access_token_ttl(&self) -> Duration;
}

/// Configuration for [`JwtTokenProvider`].
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl JwtConfig {
    /// TTLs beyond what [`Duration`] can hold saturate to [`Duration::MAX`];
    /// issuing with such a TTL then fails with [`TokenError::Issue`].
    pub fn new(secret: impl Into<String>, access_ttl_seconds: u64, refresh_ttl_seconds: u64) -> Self {
        Self {
            secret: secret.into(),
            access_ttl: ttl_from_seconds(access_ttl_seconds),
            refresh_ttl: ttl_from_seconds(refresh_ttl_seconds),
        }
    }
}

fn ttl_from_seconds(seconds: u64) -> Duration {
    i64::try_from(seconds)
        .ok()
        .and_then(Duration::try_seconds)
        .unwrap_or(Duration::MAX)
}

/// HS256 token provider keyed by a shared secret.
#[derive(Clone)]
pub struct JwtTokenProvider {
    access_ttl: Duration,
    refresh_ttl: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl fmt::Debug for JwtTokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenProvider")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtTokenProvider {
    pub fn new(config: JwtConfig) -> Self {
        Self {
            access_ttl: config.access_ttl,
            refresh_ttl: config.refresh_ttl,
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
        }
    }

    fn issue(&self, member_key: i64, kind: TokenKind, ttl: Duration) -> Result<String, TokenError> {
        let claims = TokenClaims::new(member_key, kind, ttl)?;

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            TokenError::Issue {
                kind,
                message: e.to_string(),
            }
        })
    }
}

impl TokenProvider for JwtTokenProvider {
    fn create_access_token(&self, member_key: i64) -> Result<String, TokenError> {
        self.issue(member_key, TokenKind::Access, self.access_ttl)
    }

    fn create_refresh_token(&self, member_key: i64) -> Result<String, TokenError> {
        self.issue(member_key, TokenKind::Refresh, self.refresh_ttl)
    }

    fn verify(&self, token: &str, kind: TokenKind) -> Result<TokenClaims, TokenError> {
        let validation = Validation::new(Algorithm::HS256);

        let claims = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| TokenError::Invalid(e.to_string()))?
            .claims;

        if claims.typ != kind {
            return Err(TokenError::WrongKind {
                expected: kind,
                actual: claims.typ,
            });
        }

        Ok(claims)
    }

    fn access_token_ttl(&self) -> Duration {
        self.access_ttl
    }
}
