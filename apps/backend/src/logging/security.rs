//! Security event logging.
//!
//! Events carry a stable `event` field so they can be filtered out of the
//! JSON log stream. Plaintext passwords and raw tokens are never logged.

use tracing::{debug, info};

use crate::trace_ctx;

/// A login attempt was rejected.
///
/// `reason` is `"unknown_user"` or `"password_mismatch"`. The HTTP response
/// is identical for both; only this log line tells them apart.
pub fn login_failed(reason: &'static str, username: &str) {
    let trace_id = trace_ctx::trace_id();

    info!(
        event = "SECURITY_LOGIN_FAILED",
        %trace_id,
        username,
        reason,
        "Authentication failure"
    );
}

/// The access gate rejected a request. Debug level: rejected tokens are
/// routine and the reason must not leak to the client.
pub fn access_rejected(reason: &str) {
    let trace_id = trace_ctx::trace_id();

    debug!(
        event = "SECURITY_ACCESS_REJECTED",
        %trace_id,
        reason,
        "Protected request rejected"
    );
}
