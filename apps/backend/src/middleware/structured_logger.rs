//! Access log middleware.
//!
//! Emits exactly one `request_completed` event per request once the response
//! is ready. The level follows the status class (5xx error, 4xx warn, rest
//! info) so rejected tokens and validation failures stand out without
//! drowning normal traffic.
//!
//! `RequestTrace` sits inside this middleware, so the trace id is read back
//! from the `x-request-id` response header rather than from extensions. When
//! the access gate admitted the request, the username from its `Claims` is
//! logged as `enduser.id`; credentials and tokens never are.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::Error as ActixError;
use actix_web::HttpMessage;
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn, Level};

use crate::auth::claims::Claims;
use crate::middleware::request_trace::REQUEST_ID_HEADER;

/// Level for the completion event of a response with `status`.
pub(crate) fn level_for(status: StatusCode) -> Level {
    if status.is_server_error() {
        Level::ERROR
    } else if status.is_client_error() {
        Level::WARN
    } else {
        Level::INFO
    }
}

/// Fields of one access log line.
struct Completed {
    method: String,
    path: String,
    status: StatusCode,
    duration_us: u64,
    trace_id: String,
    user: Option<String>,
}

impl Completed {
    fn emit(&self) {
        let status_code = self.status.as_u16();
        let user = self.user.as_deref().unwrap_or("-");
        let level = level_for(self.status);
        if level == Level::ERROR {
            error!(http.method = %self.method, url.path = %self.path, http.status_code = status_code, duration_us = self.duration_us, trace_id = %self.trace_id, enduser.id = %user, message = "request_completed");
        } else if level == Level::WARN {
            warn!(http.method = %self.method, url.path = %self.path, http.status_code = status_code, duration_us = self.duration_us, trace_id = %self.trace_id, enduser.id = %user, message = "request_completed");
        } else {
            info!(http.method = %self.method, url.path = %self.path, http.status_code = status_code, duration_us = self.duration_us, trace_id = %self.trace_id, enduser.id = %user, message = "request_completed");
        }
    }
}

/// Access log middleware. Wrap it outside `RequestTrace`.
pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let (status, trace_id, user) = match &result {
                Ok(res) => (
                    res.status(),
                    res.headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("unknown")
                        .to_string(),
                    res.request()
                        .extensions()
                        .get::<Claims>()
                        .map(|claims| claims.username.clone()),
                ),
                Err(err) => (
                    err.as_response_error().status_code(),
                    "unknown".to_string(),
                    None,
                ),
            };

            Completed {
                method,
                path,
                status,
                duration_us: start.elapsed().as_micros() as u64,
                trace_id,
                user,
            }
            .emit();

            result
        })
    }
}
