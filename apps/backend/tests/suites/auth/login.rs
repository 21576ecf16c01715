use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details;
use bookshelf::state::security_config::SecurityConfig;
use bookshelf::verify_access_token;
use serde_json::Value;

use crate::common::str_field;
use crate::support::auth::{login, signup};
use crate::support::{build_test_state, create_test_app};

const DAY_SECS: i64 = 24 * 60 * 60;

#[actix_web::test]
async fn login_returns_verifiable_token() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    signup(&app, "alice", "hunter2").await;

    let before = time::OffsetDateTime::now_utc().unix_timestamp();
    let resp = login(&app, "alice", "hunter2").await;
    let after = time::OffsetDateTime::now_utc().unix_timestamp();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let token = str_field(&body, "token");

    let claims = verify_access_token(token, &SecurityConfig::for_tests())?;
    assert_eq!(claims.username, "alice");
    assert!(claims.exp >= before + DAY_SECS && claims.exp <= after + DAY_SECS);
    Ok(())
}

#[actix_web::test]
async fn login_wrong_password_and_unknown_user_look_the_same(
) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    signup(&app, "alice", "hunter2").await;

    let wrong_password = login(&app, "alice", "hunter3").await;
    let wrong = assert_problem_details(
        wrong_password,
        StatusCode::UNAUTHORIZED,
        "INVALID_CREDENTIALS",
    )
    .await;

    let unknown_user = login(&app, "mallory", "hunter2").await;
    let unknown =
        assert_problem_details(unknown_user, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS")
            .await;

    assert_eq!(wrong.detail, unknown.detail);
    assert_eq!(wrong.title, unknown.title);
    assert_ne!(wrong.trace_id, unknown.trace_id);
    Ok(())
}

#[actix_web::test]
async fn login_with_blank_credentials_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let resp = login(&app, "", "").await;

    assert_problem_details(resp, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS").await;
    Ok(())
}
