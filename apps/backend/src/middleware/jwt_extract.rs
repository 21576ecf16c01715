//! Access gate for protected scopes.
//!
//! Parses `Authorization: Bearer <token>`, verifies the token and stores the
//! resulting [`Claims`] in request extensions. Any failure short-circuits with
//! a 401 problem-details response; the wrapped service is never called.

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderValue};
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::claims::Claims;
use crate::auth::jwt::verify_access_token;
use crate::error::AppError;
use crate::logging::security;
use crate::state::app_state::AppState;

pub struct JwtExtract;

impl<S, B> Transform<S, ServiceRequest> for JwtExtract
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtExtractMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtExtractMiddleware { service }))
    }
}

pub struct JwtExtractMiddleware<S> {
    service: S,
}

/// Why the gate refused a request.
struct Rejection {
    error: AppError,
    reason: &'static str,
}

impl Rejection {
    fn new(error: AppError, reason: &'static str) -> Self {
        Self { error, reason }
    }
}

impl<S, B> Service<ServiceRequest> for JwtExtractMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match admit(&req) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            // Rendered inside the future so the response carries the trace id
            Err(rejection) => Box::pin(async move {
                security::access_rejected(rejection.reason);
                let response = rejection.error.error_response().map_into_right_body();
                let (http_req, _payload) = req.into_parts();
                Ok(ServiceResponse::new(http_req, response))
            }),
        }
    }
}

fn admit(req: &ServiceRequest) -> Result<Claims, Rejection> {
    let token = bearer_token(req.headers().get(header::AUTHORIZATION))?;

    let app_state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
        Rejection::new(AppError::internal("AppState not available"), "no_state")
    })?;

    verify_access_token(token, &app_state.security)
        .map_err(|e| {
            let reason = e.reason();
            Rejection::new(AppError::from(e), reason)
        })
}

/// Extract the token from an `Authorization` header value.
///
/// Accepts exactly `Bearer <token>`: two parts separated by one space, the
/// scheme spelled `Bearer`, and a non-empty token of visible ASCII.
fn bearer_token(value: Option<&HeaderValue>) -> Result<&str, Rejection> {
    let value = value.ok_or_else(|| {
        Rejection::new(AppError::unauthorized_missing_header(), "missing_header")
    })?;

    let malformed =
        || Rejection::new(AppError::unauthorized_malformed_bearer(), "malformed_bearer");

    let raw = value.to_str().map_err(|_| malformed())?;
    let mut parts = raw.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None)
            if !token.is_empty() && token.bytes().all(|b| b.is_ascii_graphic()) =>
        {
            Ok(token)
        }
        _ => Err(malformed()),
    }
}
