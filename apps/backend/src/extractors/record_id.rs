use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Positive integer taken from the `{id}` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(pub i64);

fn parse_id(raw: Option<&str>) -> Result<RecordId, AppError> {
    let raw = raw.ok_or_else(|| AppError::bad_request(ErrorCode::InvalidId, "Missing id parameter"))?;

    let id = raw
        .parse::<i64>()
        .map_err(|_| AppError::bad_request(ErrorCode::InvalidId, format!("Invalid id: {raw}")))?;

    if id <= 0 {
        return Err(AppError::bad_request(
            ErrorCode::InvalidId,
            format!("Id must be positive, got: {id}"),
        ));
    }

    Ok(RecordId(id))
}

impl FromRequest for RecordId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_id(req.match_info().get("id")))
    }
}
