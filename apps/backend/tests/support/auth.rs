//! Signup/login helpers for HTTP tests.

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header;
use actix_web::{test, Error};
use serde_json::{json, Value};

pub async fn signup<S>(app: &S, username: &str, password: &str) -> ServiceResponse<BoxBody>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/auth/signup")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    test::call_service(app, req).await
}

pub async fn login<S>(app: &S, username: &str, password: &str) -> ServiceResponse<BoxBody>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    test::call_service(app, req).await
}

/// Sign up `username` and return a fresh access token for it.
pub async fn signup_and_login<S>(app: &S, username: &str, password: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let resp = signup(app, username, password).await;
    assert_eq!(resp.status().as_u16(), 201, "signup should succeed");

    let resp = login(app, username, password).await;
    assert_eq!(resp.status().as_u16(), 200, "login should succeed");

    let body: Value = test::read_body_json(resp).await;
    body["token"]
        .as_str()
        .expect("login response should carry a token")
        .to_string()
}

/// `GET uri` with an optional raw `Authorization` header value.
pub async fn get_with_auth<S>(
    app: &S,
    uri: &str,
    authorization: Option<&str>,
) -> ServiceResponse<BoxBody>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let mut req = test::TestRequest::get().uri(uri);
    if let Some(value) = authorization {
        req = req.insert_header((header::AUTHORIZATION, value.to_string()));
    }
    test::call_service(app, req.to_request()).await
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
