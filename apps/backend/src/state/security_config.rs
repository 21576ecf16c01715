use std::fmt;
use std::time::Duration;

use jsonwebtoken::Algorithm;

use crate::error::AppError;

/// Access tokens are valid for 24 hours from issuance.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Signing configuration shared by the token issuer and verifier.
///
/// Built once at startup and never mutated; handlers reach it through
/// `AppState`.
#[derive(Clone)]
pub struct SecurityConfig {
    /// HMAC secret for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
    /// The single accepted algorithm (HS256)
    pub algorithm: Algorithm,
    /// Lifetime of an access token
    pub token_ttl: Duration,
}

impl SecurityConfig {
    /// Create a config for the given secret. An empty secret is a
    /// configuration error.
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Result<Self, AppError> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.is_empty() {
            return Err(AppError::config("JWT secret must not be empty"));
        }
        Ok(Self {
            jwt_secret,
            algorithm: Algorithm::HS256,
            token_ttl: DEFAULT_TOKEN_TTL,
        })
    }

    pub fn with_token_ttl(mut self, token_ttl: Duration) -> Self {
        self.token_ttl = token_ttl;
        self
    }

    /// Fixed secret for test harnesses.
    pub fn for_tests() -> Self {
        Self {
            jwt_secret: b"test_secret_key_for_testing_purposes_only".to_vec(),
            algorithm: Algorithm::HS256,
            token_ttl: DEFAULT_TOKEN_TTL,
        }
    }
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("algorithm", &self.algorithm)
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}
