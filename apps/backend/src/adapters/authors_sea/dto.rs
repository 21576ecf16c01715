//! DTOs for authors_sea adapter.

/// DTO for creating a new author.
#[derive(Debug, Clone)]
pub struct AuthorCreate {
    pub first_name: String,
    pub last_name: String,
}

/// DTO for a partial author update. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct AuthorUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}
