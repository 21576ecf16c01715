//! SeaORM adapters. Functions here speak `DbErr`; the repos layer maps to
//! `DomainError`.

pub mod authors_sea;
pub mod books_sea;
pub mod users_sea;
