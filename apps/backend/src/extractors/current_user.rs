use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};
use serde::Serialize;

use crate::auth::claims::Claims;
use crate::error::AppError;

/// Identity of the caller, taken from the claims `JwtExtract` attached to
/// the request. Fails with 401 on routes the gate does not cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUser {
    pub username: String,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<Claims>()
            .map(|claims| CurrentUser {
                username: claims.username.clone(),
            })
            .ok_or_else(AppError::unauthorized_missing_header);
        ready(result)
    }
}
