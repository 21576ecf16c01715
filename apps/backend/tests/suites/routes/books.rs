use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::{test, Error};
use backend_test_support::problem_details::assert_problem_details;
use serde_json::{json, Value};

use crate::common::{i64_field, str_field};
use crate::support::auth::{bearer, signup_and_login};
use crate::support::{build_test_state, create_test_app};

async fn send<S>(
    app: &S,
    req: test::TestRequest,
    token: &str,
) -> ServiceResponse<BoxBody>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = req
        .insert_header((header::AUTHORIZATION, bearer(token)))
        .to_request();
    test::call_service(app, req).await
}

async fn create_author<S>(app: &S, token: &str, first: &str, last: &str) -> i64
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/authors")
        .set_json(json!({ "first_name": first, "last_name": last }));
    let resp = send(app, req, token).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    i64_field(&body, "id")
}

async fn create_book<S>(app: &S, token: &str, title: &str, author_id: i64) -> Value
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/books")
        .set_json(json!({ "title": title, "author_id": author_id }));
    let resp = send(app, req, token).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    test::read_body_json(resp).await
}

#[actix_web::test]
async fn book_crud_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let token = signup_and_login(&app, "alice", "hunter2").await;

    let author_id = create_author(&app, &token, "Ursula", "Le Guin").await;
    let book = create_book(&app, &token, "The Dispossessed", author_id).await;
    let book_id = i64_field(&book, "id");
    assert_eq!(str_field(&book, "title"), "The Dispossessed");
    assert_eq!(i64_field(&book, "author_id"), author_id);

    let resp = send(&app, test::TestRequest::get().uri(&format!("/books/{book_id}")), &token).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Value = test::read_body_json(resp).await;
    assert_eq!(fetched, book);

    // Blank title keeps the stored one
    let req = test::TestRequest::put()
        .uri(&format!("/books/{book_id}"))
        .set_json(json!({ "title": "  " }));
    let resp = send(&app, req, &token).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let unchanged: Value = test::read_body_json(resp).await;
    assert_eq!(str_field(&unchanged, "title"), "The Dispossessed");

    let req = test::TestRequest::put()
        .uri(&format!("/books/{book_id}"))
        .set_json(json!({ "title": "The Left Hand of Darkness" }));
    let resp = send(&app, req, &token).await;
    let updated: Value = test::read_body_json(resp).await;
    assert_eq!(str_field(&updated, "title"), "The Left Hand of Darkness");

    let resp = send(&app, test::TestRequest::get().uri("/books"), &token).await;
    let all: Value = test::read_body_json(resp).await;
    assert_eq!(all.as_array().map(Vec::len), Some(1));

    let req = test::TestRequest::delete().uri(&format!("/books/{book_id}"));
    let resp = send(&app, req, &token).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(&app, test::TestRequest::get().uri(&format!("/books/{book_id}")), &token).await;
    assert_problem_details(resp, StatusCode::NOT_FOUND, "BOOK_NOT_FOUND").await;
    Ok(())
}

#[actix_web::test]
async fn book_with_unknown_author_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let token = signup_and_login(&app, "alice", "hunter2").await;

    let req = test::TestRequest::post()
        .uri("/books")
        .set_json(json!({ "title": "Orphan", "author_id": 404 }));
    let resp = send(&app, req, &token).await;

    assert_problem_details(resp, StatusCode::BAD_REQUEST, "UNKNOWN_AUTHOR").await;
    Ok(())
}

#[actix_web::test]
async fn book_requires_title() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let token = signup_and_login(&app, "alice", "hunter2").await;
    let author_id = create_author(&app, &token, "Iain", "Banks").await;

    let req = test::TestRequest::post()
        .uri("/books")
        .set_json(json!({ "title": "", "author_id": author_id }));
    let resp = send(&app, req, &token).await;

    assert_problem_details(resp, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
    Ok(())
}

#[actix_web::test]
async fn invalid_book_id_is_bad_request() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let token = signup_and_login(&app, "alice", "hunter2").await;

    for uri in ["/books/abc", "/books/0", "/books/-1"] {
        let resp = send(&app, test::TestRequest::get().uri(uri), &token).await;
        assert_problem_details(resp, StatusCode::BAD_REQUEST, "INVALID_ID").await;
    }
    Ok(())
}

#[actix_web::test]
async fn books_and_authors_joins_each_book() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let token = signup_and_login(&app, "alice", "hunter2").await;

    let le_guin = create_author(&app, &token, "Ursula", "Le Guin").await;
    let banks = create_author(&app, &token, "Iain", "Banks").await;
    create_book(&app, &token, "The Dispossessed", le_guin).await;
    create_book(&app, &token, "Excession", banks).await;

    let resp = send(&app, test::TestRequest::get().uri("/books/books-and-authors"), &token).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let rows: Value = test::read_body_json(resp).await;

    let rows = rows.as_array().cloned().unwrap_or_default();
    assert_eq!(rows.len(), 2);
    assert_eq!(str_field(&rows[0], "title"), "The Dispossessed");
    assert_eq!(str_field(&rows[0]["author"], "last_name"), "Le Guin");
    assert_eq!(str_field(&rows[1]["author"], "first_name"), "Iain");
    Ok(())
}

#[actix_web::test]
async fn books_by_author_matches_full_name() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let token = signup_and_login(&app, "alice", "hunter2").await;

    let le_guin = create_author(&app, &token, "Ursula", "Le Guin").await;
    let banks = create_author(&app, &token, "Iain", "Banks").await;
    create_book(&app, &token, "The Dispossessed", le_guin).await;
    create_book(&app, &token, "The Lathe of Heaven", le_guin).await;
    create_book(&app, &token, "Excession", banks).await;

    let resp = send(
        &app,
        test::TestRequest::get().uri("/books/books-by-author/Ursula%20Le%20Guin"),
        &token,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let books: Value = test::read_body_json(resp).await;
    let titles: Vec<&str> = books
        .as_array()
        .map(|a| a.iter().filter_map(|b| b["title"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(titles, vec!["The Dispossessed", "The Lathe of Heaven"]);

    let resp = send(
        &app,
        test::TestRequest::get().uri("/books/books-by-author/Nobody"),
        &token,
    )
    .await;
    let books: Value = test::read_body_json(resp).await;
    assert_eq!(books, json!([]));
    Ok(())
}
