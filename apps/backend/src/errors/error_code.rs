//! Error codes for the bookshelf API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! Every code is SCREAMING_SNAKE_CASE and maps 1:1 to the string that
//! appears in HTTP responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication
    /// No Authorization header on a protected route
    UnauthorizedMissingHeader,
    /// Authorization header is not `Bearer <token>`
    UnauthorizedMalformedBearer,
    /// Token failed verification (any reason)
    UnauthorizedInvalidToken,
    /// Login rejected; never says whether the user exists
    InvalidCredentials,

    // Request Validation
    /// Path id is not a positive integer
    InvalidId,
    InvalidUsername,
    InvalidPassword,
    /// Book references an author that does not exist
    UnknownAuthor,
    ValidationError,
    BadRequest,

    // Resource Not Found
    BookNotFound,
    AuthorNotFound,
    NotFound,

    // Conflicts
    UsernameTaken,
    /// Author still referenced by at least one book
    AuthorHasBooks,
    Conflict,

    // System Errors
    DbError,
    DbUnavailable,
    DbTimeout,
    Internal,
    ConfigError,
}

impl ErrorCode {
    /// Canonical string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnauthorizedMissingHeader => "UNAUTHORIZED_MISSING_HEADER",
            Self::UnauthorizedMalformedBearer => "UNAUTHORIZED_MALFORMED_BEARER",
            Self::UnauthorizedInvalidToken => "UNAUTHORIZED_INVALID_TOKEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",

            Self::InvalidId => "INVALID_ID",
            Self::InvalidUsername => "INVALID_USERNAME",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::UnknownAuthor => "UNKNOWN_AUTHOR",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::BookNotFound => "BOOK_NOT_FOUND",
            Self::AuthorNotFound => "AUTHOR_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::AuthorHasBooks => "AUTHOR_HAS_BOOKS",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
