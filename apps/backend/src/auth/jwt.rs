use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Deserialize;
use thiserror::Error;

use crate::auth::claims::{Claims, RawClaims};
use crate::errors::ErrorCode;
use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Why a token was refused. Callers outside the auth core only ever see a
/// uniform unauthorized error; the reason is for logs and tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),
    #[error("signature mismatch")]
    SignatureMismatch,
    #[error("token expired")]
    Expired,
    #[error("missing required claim: {0}")]
    MissingClaim(&'static str),
}

impl TokenError {
    /// Stable snake_case label for structured logs.
    pub fn reason(&self) -> &'static str {
        match self {
            TokenError::Malformed => "malformed",
            TokenError::UnsupportedAlgorithm(_) => "unsupported_algorithm",
            TokenError::SignatureMismatch => "signature_mismatch",
            TokenError::Expired => "expired",
            TokenError::MissingClaim(_) => "missing_claim",
        }
    }
}

/// Only the field we need to police before touching the signature.
#[derive(Deserialize)]
struct HeaderPeek {
    alg: String,
}

fn unix_seconds(now: SystemTime) -> Option<i64> {
    now.duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|d| i64::try_from(d.as_secs()).ok())
}

/// Mint an HS256 access token for `username`, expiring `token_ttl`
/// (24h by default) after `now`.
pub fn mint_access_token(
    username: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    if username.is_empty() {
        return Err(AppError::invalid(
            ErrorCode::InvalidUsername,
            "Username cannot be empty",
        ));
    }

    let iat = unix_seconds(now)
        .ok_or_else(|| AppError::internal("Failed to get current time"))?;
    let ttl = i64::try_from(security.token_ttl.as_secs())
        .map_err(|_| AppError::config("Token TTL out of range"))?;

    let exp = iat
        .checked_add(ttl)
        .ok_or_else(|| AppError::internal("Token expiry out of range"))?;

    let claims = Claims {
        username: username.to_string(),
        exp,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify a token against the current clock.
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Claims, TokenError> {
    verify_access_token_at(token, SystemTime::now(), security)
}

/// Verify a token as of `now`.
///
/// Steps, each terminal on failure:
/// 1. three dot-separated segments
/// 2. header `alg` must equal the configured algorithm, checked before any
///    signature work so the header can never pick the verification method
/// 3. HMAC signature (constant-time compare inside jsonwebtoken)
/// 4. strict claims: `username` and `exp` present, nothing else
/// 5. `exp` strictly after `now`, no leeway
pub fn verify_access_token_at(
    token: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<Claims, TokenError> {
    let mut segments = token.split('.');
    let header_segment = match (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) {
        (Some(h), Some(c), Some(s), None) if !h.is_empty() && !c.is_empty() && !s.is_empty() => h,
        _ => return Err(TokenError::Malformed),
    };

    check_algorithm(header_segment, security.algorithm)?;

    // exp is enforced below against the caller's clock.
    let mut validation = Validation::new(security.algorithm);
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let raw = decode::<RawClaims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::InvalidSignature => TokenError::SignatureMismatch,
        // The header was already decoded above and claims are only decoded
        // after the signature verifies, so this is the signature segment.
        ErrorKind::Base64(_) => TokenError::SignatureMismatch,
        ErrorKind::InvalidAlgorithm => TokenError::UnsupportedAlgorithm(format!(
            "{:?}",
            security.algorithm
        )),
        _ => TokenError::Malformed,
    })?;

    let username = raw
        .username
        .filter(|u| !u.is_empty())
        .ok_or(TokenError::MissingClaim("username"))?;
    let exp = raw.exp.ok_or(TokenError::MissingClaim("exp"))?;

    // A clock before the epoch cannot establish validity.
    let now = unix_seconds(now).ok_or(TokenError::Expired)?;
    if exp <= now {
        return Err(TokenError::Expired);
    }

    Ok(Claims { username, exp })
}

fn check_algorithm(header_segment: &str, expected: Algorithm) -> Result<(), TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(header_segment)
        .map_err(|_| TokenError::Malformed)?;
    let peek: HeaderPeek = serde_json::from_slice(&bytes).map_err(|_| TokenError::Malformed)?;

    match Algorithm::from_str(&peek.alg) {
        Ok(alg) if alg == expected => Ok(()),
        _ => Err(TokenError::UnsupportedAlgorithm(peek.alg)),
    }
}
