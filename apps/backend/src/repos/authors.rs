//! Author repository functions for domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;

use crate::adapters::authors_sea as authors_adapter;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};

/// Author domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    /// "First Last", the form used for name lookups.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

fn author_not_found(author_id: i64) -> DomainError {
    DomainError::not_found(NotFoundKind::Author, format!("Author {author_id} not found"))
}

pub async fn list_authors<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Author>, DomainError> {
    let authors = authors_adapter::list_authors(conn).await?;
    Ok(authors.into_iter().map(Author::from).collect())
}

pub async fn find_author<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    author_id: i64,
) -> Result<Option<Author>, DomainError> {
    let author = authors_adapter::find_author_by_id(conn, author_id).await?;
    Ok(author.map(Author::from))
}

pub async fn require_author<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    author_id: i64,
) -> Result<Author, DomainError> {
    find_author(conn, author_id)
        .await?
        .ok_or_else(|| author_not_found(author_id))
}

pub async fn create_author<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    first_name: &str,
    last_name: &str,
) -> Result<Author, DomainError> {
    let dto = authors_adapter::AuthorCreate {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
    };
    let author = authors_adapter::create_author(conn, dto).await?;
    Ok(Author::from(author))
}

/// Partial update: `None` keeps the stored value.
pub async fn update_author<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    author_id: i64,
    first_name: Option<String>,
    last_name: Option<String>,
) -> Result<Author, DomainError> {
    require_author(conn, author_id).await?;

    let dto = authors_adapter::AuthorUpdate {
        first_name,
        last_name,
    };
    let author = authors_adapter::update_author(conn, author_id, dto).await?;
    Ok(Author::from(author))
}

/// Delete an author. Refused while any book still references it.
pub async fn delete_author<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    author_id: i64,
) -> Result<(), DomainError> {
    require_author(conn, author_id).await?;

    let books = authors_adapter::count_books_for_author(conn, author_id).await?;
    if books > 0 {
        return Err(DomainError::conflict(
            ConflictKind::AuthorHasBooks,
            format!("Author {author_id} still has {books} book(s)"),
        ));
    }

    match authors_adapter::delete_author(conn, author_id).await? {
        0 => Err(author_not_found(author_id)),
        _ => Ok(()),
    }
}

impl From<crate::entities::authors::Model> for Author {
    fn from(model: crate::entities::authors::Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
        }
    }
}
