use actix_web::web;

use crate::middleware::jwt_extract::JwtExtract;

pub mod auth;
pub mod authors;
pub mod books;
pub mod health;

/// Register every route. Used by `main.rs` and the test harness alike, so
/// tests exercise the same gate placement as production.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Public: /health, /auth/**
    cfg.service(web::scope("/health").configure(health::configure_routes));
    cfg.service(web::scope("/auth").configure(auth::configure_routes));

    // Gated: /books/**, /authors/**
    cfg.service(
        web::scope("/books")
            .wrap(JwtExtract)
            .configure(books::configure_routes),
    );
    cfg.service(
        web::scope("/authors")
            .wrap(JwtExtract)
            .configure(authors::configure_routes),
    );
}

/// Treat blank strings as absent, for partial updates.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
