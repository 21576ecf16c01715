//! Repository functions for the domain layer (generic over ConnectionTrait).

pub mod authors;
pub mod books;
pub mod users;
