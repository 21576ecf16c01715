//! Claims carried inside access tokens.

use serde::{Deserialize, Serialize};

/// Verified claims, inserted into request extensions by the access gate.
///
/// Decoding is strict: a token carrying any other claim is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Claims {
    /// Account username; the only identity carried end-to-end
    pub username: String,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

/// Wire shape used while decoding, so a missing claim can be reported by
/// name instead of as a generic parse failure.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawClaims {
    pub username: Option<String>,
    pub exp: Option<i64>,
}
