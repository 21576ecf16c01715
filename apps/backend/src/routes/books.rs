use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{CurrentUser, RecordId, ValidatedJson};
use crate::infra::db::require_db;
use crate::repos::books::{self, Book};
use crate::routes::authors::AuthorResponse;
use crate::routes::non_blank;
use crate::state::app_state::AppState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookResponse {
    pub id: i64,
    pub title: String,
    pub author_id: i64,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author_id: book.author_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookWithAuthorResponse {
    pub id: i64,
    pub title: String,
    pub author: AuthorResponse,
}

#[derive(Deserialize)]
pub struct CreateBookRequest {
    #[serde(default)]
    pub title: String,
    pub author_id: i64,
}

#[derive(Deserialize)]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub author_id: Option<i64>,
}

fn book_list(books: Vec<Book>) -> Vec<BookResponse> {
    books.into_iter().map(BookResponse::from).collect()
}

async fn list_books(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let books = books::list_books(db).await?;

    Ok(HttpResponse::Ok().json(book_list(books)))
}

async fn list_books_and_authors(
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let rows: Vec<BookWithAuthorResponse> = books::list_books_with_authors(db)
        .await?
        .into_iter()
        .map(|(book, author)| BookWithAuthorResponse {
            id: book.id,
            title: book.title,
            author: AuthorResponse::from(author),
        })
        .collect();

    Ok(HttpResponse::Ok().json(rows))
}

async fn list_books_by_author(
    author_name: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let books = books::list_books_by_author_name(db, &author_name).await?;

    Ok(HttpResponse::Ok().json(book_list(books)))
}

async fn get_book(id: RecordId, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let book = books::require_book(db, id.0).await?;

    Ok(HttpResponse::Ok().json(BookResponse::from(book)))
}

async fn create_book(
    user: CurrentUser,
    body: ValidatedJson<CreateBookRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let Some(title) = non_blank(Some(body.title)) else {
        return Err(AppError::invalid(
            ErrorCode::ValidationError,
            "title is required",
        ));
    };

    let db = require_db(&app_state)?;
    let book = books::create_book(db, &title, body.author_id).await?;
    info!(book_id = book.id, username = %user.username, "Book created");

    Ok(HttpResponse::Created().json(BookResponse::from(book)))
}

async fn update_book(
    id: RecordId,
    body: ValidatedJson<UpdateBookRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let db = require_db(&app_state)?;
    let book = books::update_book(db, id.0, non_blank(body.title), body.author_id).await?;

    Ok(HttpResponse::Ok().json(BookResponse::from(book)))
}

async fn delete_book(
    user: CurrentUser,
    id: RecordId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    books::delete_book(db, id.0).await?;
    info!(book_id = id.0, username = %user.username, "Book deleted");

    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Literal segments before `/{id}`
    cfg.service(web::resource("/books-and-authors").route(web::get().to(list_books_and_authors)))
        .service(
            web::resource("/books-by-author/{author_name}")
                .route(web::get().to(list_books_by_author)),
        )
        .service(
            web::resource("")
                .route(web::get().to(list_books))
                .route(web::post().to(create_book)),
        )
        .service(
            web::resource("/{id}")
                .route(web::get().to(get_book))
                .route(web::put().to(update_book))
                .route(web::delete().to(delete_book)),
        );
}
