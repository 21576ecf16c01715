//! SeaORM adapter for book repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::{authors, books};

pub mod dto;

pub use dto::{BookCreate, BookUpdate};

pub async fn list_books<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<books::Model>, sea_orm::DbErr> {
    books::Entity::find()
        .order_by_asc(books::Column::Id)
        .all(conn)
        .await
}

/// Every book paired with its author.
pub async fn list_books_with_authors<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<(books::Model, Option<authors::Model>)>, sea_orm::DbErr> {
    books::Entity::find()
        .find_also_related(authors::Entity)
        .order_by_asc(books::Column::Id)
        .all(conn)
        .await
}

pub async fn list_books_by_author_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    author_ids: Vec<i64>,
) -> Result<Vec<books::Model>, sea_orm::DbErr> {
    books::Entity::find()
        .filter(books::Column::AuthorId.is_in(author_ids))
        .order_by_asc(books::Column::Id)
        .all(conn)
        .await
}

pub async fn find_book_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    book_id: i64,
) -> Result<Option<books::Model>, sea_orm::DbErr> {
    books::Entity::find_by_id(book_id).one(conn).await
}

pub async fn create_book<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: BookCreate,
) -> Result<books::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let book_active = books::ActiveModel {
        id: NotSet,
        title: Set(dto.title),
        author_id: Set(dto.author_id),
        created_at: Set(now),
        updated_at: Set(now),
    };

    book_active.insert(conn).await
}

/// Apply `dto` to an existing row. Returns `RecordNotFound` if the id is absent.
pub async fn update_book<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    book_id: i64,
    dto: BookUpdate,
) -> Result<books::Model, sea_orm::DbErr> {
    let existing = books::Entity::find_by_id(book_id)
        .one(conn)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound(format!("books.id={book_id}")))?;

    let mut active: books::ActiveModel = existing.into();
    if let Some(title) = dto.title {
        active.title = Set(title);
    }
    if let Some(author_id) = dto.author_id {
        active.author_id = Set(author_id);
    }
    active.updated_at = Set(time::OffsetDateTime::now_utc());

    active.update(conn).await
}

/// Delete by id. Returns the number of rows removed.
pub async fn delete_book<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    book_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = books::Entity::delete_by_id(book_id).exec(conn).await?;
    Ok(result.rows_affected)
}
