//! Problem Details assertions shared by backend tests.
//!
//! The struct below mirrors the backend's error body without depending on
//! backend types, so a change to the wire contract breaks these tests.

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::{HeaderName, CONTENT_TYPE, WWW_AUTHENTICATE};
use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct ProblemDetailsLike {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

/// Assert that a response conforms to the error contract and return the body.
///
/// Checks:
/// - HTTP status and `code` match
/// - content type is `application/problem+json`
/// - `x-trace-id` header matches the body's `trace_id`
/// - 401 responses carry `WWW-Authenticate: Bearer`
pub async fn assert_problem_details(
    resp: ServiceResponse<BoxBody>,
    expected_status: StatusCode,
    expected_code: &str,
) -> ProblemDetailsLike {
    assert_eq!(resp.status(), expected_status);

    let headers = resp.headers().clone();

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("application/problem+json"),
        "Content-Type must be application/problem+json (got {content_type})"
    );

    if expected_status == StatusCode::UNAUTHORIZED {
        let challenge = headers
            .get(WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok())
            .expect("401 responses should carry WWW-Authenticate");
        assert_eq!(challenge, "Bearer");
    }

    let body = actix_web::body::to_bytes(resp.into_body())
        .await
        .expect("response body should be readable");
    let problem: ProblemDetailsLike =
        serde_json::from_slice(&body).expect("body should be valid ProblemDetails JSON");

    let trace_hdr = HeaderName::from_static("x-trace-id");
    let trace_id = headers
        .get(&trace_hdr)
        .and_then(|v| v.to_str().ok())
        .expect("x-trace-id header should be present");
    assert_eq!(
        problem.trace_id, trace_id,
        "trace_id in body should match x-trace-id header"
    );

    assert_eq!(problem.code, expected_code);
    assert_eq!(problem.status, expected_status.as_u16());

    problem
}
