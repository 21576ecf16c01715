//! DTOs for books_sea adapter.

/// DTO for creating a new book.
#[derive(Debug, Clone)]
pub struct BookCreate {
    pub title: String,
    pub author_id: i64,
}

/// DTO for a partial book update. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct BookUpdate {
    pub title: Option<String>,
    pub author_id: Option<i64>,
}
