//! SeaORM adapter for author repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::{authors, books};

pub mod dto;

pub use dto::{AuthorCreate, AuthorUpdate};

pub async fn list_authors<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<authors::Model>, sea_orm::DbErr> {
    authors::Entity::find()
        .order_by_asc(authors::Column::Id)
        .all(conn)
        .await
}

pub async fn find_author_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    author_id: i64,
) -> Result<Option<authors::Model>, sea_orm::DbErr> {
    authors::Entity::find_by_id(author_id).one(conn).await
}

pub async fn create_author<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: AuthorCreate,
) -> Result<authors::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let author_active = authors::ActiveModel {
        id: NotSet,
        first_name: Set(dto.first_name),
        last_name: Set(dto.last_name),
        created_at: Set(now),
        updated_at: Set(now),
    };

    author_active.insert(conn).await
}

/// Apply `dto` to an existing row. Returns `RecordNotFound` if the id is absent.
pub async fn update_author<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    author_id: i64,
    dto: AuthorUpdate,
) -> Result<authors::Model, sea_orm::DbErr> {
    let existing = authors::Entity::find_by_id(author_id)
        .one(conn)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound(format!("authors.id={author_id}")))?;

    let mut active: authors::ActiveModel = existing.into();
    if let Some(first_name) = dto.first_name {
        active.first_name = Set(first_name);
    }
    if let Some(last_name) = dto.last_name {
        active.last_name = Set(last_name);
    }
    active.updated_at = Set(time::OffsetDateTime::now_utc());

    active.update(conn).await
}

/// Delete by id. Returns the number of rows removed.
pub async fn delete_author<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    author_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = authors::Entity::delete_by_id(author_id).exec(conn).await?;
    Ok(result.rows_affected)
}

pub async fn count_books_for_author<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    author_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    books::Entity::find()
        .filter(books::Column::AuthorId.eq(author_id))
        .count(conn)
        .await
}
