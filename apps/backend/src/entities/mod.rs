pub mod authors;
pub mod books;
pub mod users;

pub use authors::Entity as Authors;
pub use authors::Model as Author;
pub use books::Entity as Books;
pub use books::Model as Book;
pub use users::Entity as Users;
pub use users::Model as User;
