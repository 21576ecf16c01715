use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Registry of the redaction patterns. Each literal is vetted and compiles.
pub struct PiiRegexRegistry;

impl PiiRegexRegistry {
    /// Argon2 PHC strings (`$argon2id$v=19$m=...$salt$hash`)
    pub fn password_hash() -> &'static Regex {
        static PHC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r#"\$argon2(?:id|i|d)\$[^\s"']+"#).unwrap()
        });
        &PHC_REGEX
    }

    /// Compact JWS: three base64url segments joined by dots
    pub fn compact_jwt() -> &'static Regex {
        static JWT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}").unwrap()
        });
        &JWT_REGEX
    }

    /// Other opaque base64-like runs (16+ chars)
    pub fn base64_token() -> &'static Regex {
        static BASE64_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9+/]{16,}={0,2}").unwrap()
        });
        &BASE64_TOKEN_REGEX
    }
}

/// Mask credentials that may leak into log lines.
///
/// Order matters: password hashes first, then whole JWTs, then any remaining
/// opaque runs, so a JWT is reported as one placeholder.
pub fn redact(input: &str) -> String {
    let hashes = PiiRegexRegistry::password_hash().replace_all(input, "[REDACTED_HASH]");
    let jwts = PiiRegexRegistry::compact_jwt().replace_all(&hashes, "[REDACTED_JWT]");
    PiiRegexRegistry::base64_token()
        .replace_all(&jwts, "[REDACTED_TOKEN]")
        .to_string()
}

/// Display wrapper that redacts on format.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}
