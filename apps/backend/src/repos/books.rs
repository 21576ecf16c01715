//! Book repository functions for domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;

use crate::adapters::{authors_sea as authors_adapter, books_sea as books_adapter};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::repos::authors::Author;

/// Book domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author_id: i64,
}

fn book_not_found(book_id: i64) -> DomainError {
    DomainError::not_found(NotFoundKind::Book, format!("Book {book_id} not found"))
}

async fn ensure_author_exists<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    author_id: i64,
) -> Result<(), DomainError> {
    match authors_adapter::find_author_by_id(conn, author_id).await? {
        Some(_) => Ok(()),
        None => Err(DomainError::validation(
            ValidationKind::UnknownAuthor,
            format!("Author {author_id} does not exist"),
        )),
    }
}

pub async fn list_books<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Book>, DomainError> {
    let books = books_adapter::list_books(conn).await?;
    Ok(books.into_iter().map(Book::from).collect())
}

/// Every book with its author. Rows whose author vanished are skipped.
pub async fn list_books_with_authors<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<(Book, Author)>, DomainError> {
    let rows = books_adapter::list_books_with_authors(conn).await?;
    Ok(rows
        .into_iter()
        .filter_map(|(book, author)| author.map(|a| (Book::from(book), Author::from(a))))
        .collect())
}

/// Books whose author's full name ("First Last") equals `author_name`.
pub async fn list_books_by_author_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    author_name: &str,
) -> Result<Vec<Book>, DomainError> {
    let wanted = author_name.trim();
    let author_ids: Vec<i64> = authors_adapter::list_authors(conn)
        .await?
        .into_iter()
        .map(Author::from)
        .filter(|a| a.full_name() == wanted)
        .map(|a| a.id)
        .collect();

    if author_ids.is_empty() {
        return Ok(Vec::new());
    }

    let books = books_adapter::list_books_by_author_ids(conn, author_ids).await?;
    Ok(books.into_iter().map(Book::from).collect())
}

pub async fn require_book<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    book_id: i64,
) -> Result<Book, DomainError> {
    books_adapter::find_book_by_id(conn, book_id)
        .await?
        .map(Book::from)
        .ok_or_else(|| book_not_found(book_id))
}

pub async fn create_book<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    title: &str,
    author_id: i64,
) -> Result<Book, DomainError> {
    ensure_author_exists(conn, author_id).await?;

    let dto = books_adapter::BookCreate {
        title: title.to_string(),
        author_id,
    };
    let book = books_adapter::create_book(conn, dto).await?;
    Ok(Book::from(book))
}

/// Partial update: `None` keeps the stored value.
pub async fn update_book<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    book_id: i64,
    title: Option<String>,
    author_id: Option<i64>,
) -> Result<Book, DomainError> {
    require_book(conn, book_id).await?;
    if let Some(author_id) = author_id {
        ensure_author_exists(conn, author_id).await?;
    }

    let dto = books_adapter::BookUpdate { title, author_id };
    let book = books_adapter::update_book(conn, book_id, dto).await?;
    Ok(Book::from(book))
}

pub async fn delete_book<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    book_id: i64,
) -> Result<(), DomainError> {
    match books_adapter::delete_book(conn, book_id).await? {
        0 => Err(book_not_found(book_id)),
        _ => Ok(()),
    }
}

impl From<crate::entities::books::Model> for Book {
    fn from(model: crate::entities::books::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            author_id: model.author_id,
        }
    }
}
