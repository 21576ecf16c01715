use actix_web::http::{header, StatusCode};
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details;
use serde_json::{json, Value};

use crate::common::{i64_field, str_field};
use crate::support::auth::{bearer, signup_and_login};
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn author_partial_update_and_delete() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let token = signup_and_login(&app, "alice", "hunter2").await;
    let auth = (header::AUTHORIZATION, bearer(&token));

    let req = test::TestRequest::post()
        .uri("/authors")
        .insert_header(auth.clone())
        .set_json(json!({ "first_name": "Ursula", "last_name": "Le Guin" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let author: Value = test::read_body_json(resp).await;
    let id = i64_field(&author, "id");

    // Absent first_name and blank last_name keep stored values
    let req = test::TestRequest::put()
        .uri(&format!("/authors/{id}"))
        .insert_header(auth.clone())
        .set_json(json!({ "last_name": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let unchanged: Value = test::read_body_json(resp).await;
    assert_eq!(unchanged, author);

    let req = test::TestRequest::put()
        .uri(&format!("/authors/{id}"))
        .insert_header(auth.clone())
        .set_json(json!({ "first_name": "Ursula K." }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let updated: Value = test::read_body_json(resp).await;
    assert_eq!(str_field(&updated, "first_name"), "Ursula K.");
    assert_eq!(str_field(&updated, "last_name"), "Le Guin");

    let req = test::TestRequest::get()
        .uri("/authors")
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    let all: Value = test::read_body_json(resp).await;
    assert_eq!(all, json!([updated]));

    let req = test::TestRequest::delete()
        .uri(&format!("/authors/{id}"))
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/authors/{id}"))
        .insert_header(auth)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, StatusCode::NOT_FOUND, "AUTHOR_NOT_FOUND").await;
    Ok(())
}

#[actix_web::test]
async fn author_with_books_cannot_be_deleted() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let token = signup_and_login(&app, "alice", "hunter2").await;
    let auth = (header::AUTHORIZATION, bearer(&token));

    let req = test::TestRequest::post()
        .uri("/authors")
        .insert_header(auth.clone())
        .set_json(json!({ "first_name": "Iain", "last_name": "Banks" }))
        .to_request();
    let author: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let id = i64_field(&author, "id");

    let req = test::TestRequest::post()
        .uri("/books")
        .insert_header(auth.clone())
        .set_json(json!({ "title": "Excession", "author_id": id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::delete()
        .uri(&format!("/authors/{id}"))
        .insert_header(auth)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details(resp, StatusCode::CONFLICT, "AUTHOR_HAS_BOOKS").await;
    Ok(())
}

#[actix_web::test]
async fn author_requires_both_names() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let token = signup_and_login(&app, "alice", "hunter2").await;

    let req = test::TestRequest::post()
        .uri("/authors")
        .insert_header((header::AUTHORIZATION, bearer(&token)))
        .set_json(json!({ "first_name": "Iain" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details(resp, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
    Ok(())
}

#[actix_web::test]
async fn updating_missing_author_is_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let token = signup_and_login(&app, "alice", "hunter2").await;

    let req = test::TestRequest::put()
        .uri("/authors/999")
        .insert_header((header::AUTHORIZATION, bearer(&token)))
        .set_json(json!({ "first_name": "Nobody" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details(resp, StatusCode::NOT_FOUND, "AUTHOR_NOT_FOUND").await;
    Ok(())
}
