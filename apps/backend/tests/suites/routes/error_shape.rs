use actix_web::http::StatusCode;
use actix_web::{test, web, HttpResponse};
use backend_test_support::problem_details::assert_problem_details;
use bookshelf::errors::ErrorCode;
use bookshelf::AppError;

use crate::support::{build_test_state, create_test_app};

async fn fail_internal() -> Result<HttpResponse, AppError> {
    Err(AppError::internal("connection string postgres://secret@db"))
}

async fn fail_conflict() -> Result<HttpResponse, AppError> {
    Err(AppError::conflict(ErrorCode::Conflict, "already there"))
}

#[actix_web::test]
async fn server_errors_hide_internal_detail() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state)
        .with_routes(|cfg| {
            cfg.route("/boom", web::get().to(fail_internal));
        })
        .build()
        .await?;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/boom").to_request()).await;

    let problem =
        assert_problem_details(resp, StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL").await;
    assert!(!problem.detail.contains("secret"));
    assert_eq!(problem.type_, "https://bookshelf.local/errors/INTERNAL");
    Ok(())
}

#[actix_web::test]
async fn trace_id_matches_request_id() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state)
        .with_routes(|cfg| {
            cfg.route("/conflict", web::get().to(fail_conflict));
        })
        .build()
        .await?;

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/conflict").to_request()).await;
    let request_id = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_default();

    let problem = assert_problem_details(resp, StatusCode::CONFLICT, "CONFLICT").await;
    assert_eq!(problem.trace_id, request_id);
    assert_eq!(problem.title, "Conflict");
    Ok(())
}
