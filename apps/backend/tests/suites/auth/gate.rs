use std::time::{Duration, SystemTime};

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details;
use bookshelf::mint_access_token;
use bookshelf::state::security_config::SecurityConfig;
use serde_json::Value;

use crate::support::auth::{bearer, get_with_auth, signup_and_login};
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn login_token_is_admitted() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let token = signup_and_login(&app, "alice", "hunter2").await;

    let resp = get_with_auth(&app, "/books", Some(&bearer(&token))).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, serde_json::json!([]));
    Ok(())
}

#[actix_web::test]
async fn missing_header_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    for uri in ["/books", "/authors", "/books/books-and-authors", "/authors/1"] {
        let resp = get_with_auth(&app, uri, None).await;
        assert_problem_details(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED_MISSING_HEADER")
            .await;
    }
    Ok(())
}

#[actix_web::test]
async fn malformed_bearer_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let token = signup_and_login(&app, "alice", "hunter2").await;

    let cases = [
        token.clone(),
        format!("bearer {token}"),
        format!("Bearer  {token}"),
        format!("Basic {token}"),
        "Bearer".to_string(),
        format!("Bearer {token} extra"),
    ];
    for value in cases {
        let resp = get_with_auth(&app, "/books", Some(&value)).await;
        assert_problem_details(
            resp,
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED_MALFORMED_BEARER",
        )
        .await;
    }
    Ok(())
}

#[actix_web::test]
async fn tampered_token_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let token = signup_and_login(&app, "alice", "hunter2").await;

    let resp = get_with_auth(&app, "/books", Some(&bearer(&format!("{token}x")))).await;

    let problem =
        assert_problem_details(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED_INVALID_TOKEN")
            .await;
    assert_ne!(problem.trace_id, "unknown");
    Ok(())
}

#[actix_web::test]
async fn token_issued_a_day_and_a_second_ago_is_rejected(
) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let issued = SystemTime::now() - Duration::from_secs(24 * 60 * 60 + 1);
    let token = mint_access_token("alice", issued, &SecurityConfig::for_tests())?;

    let resp = get_with_auth(&app, "/books", Some(&bearer(&token))).await;

    assert_problem_details(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED_INVALID_TOKEN").await;
    Ok(())
}

#[actix_web::test]
async fn token_signed_with_another_secret_is_rejected() -> Result<(), Box<dyn std::error::Error>>
{
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let other = SecurityConfig::new("a-completely-different-secret")?;
    let token = mint_access_token("alice", SystemTime::now(), &other)?;

    let resp = get_with_auth(&app, "/authors", Some(&bearer(&token))).await;

    assert_problem_details(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED_INVALID_TOKEN").await;
    Ok(())
}

#[actix_web::test]
async fn public_routes_need_no_token() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let resp = get_with_auth(&app, "/health", None).await;

    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}
