pub mod claims;
pub mod jwt;
pub mod password;

pub use claims::Claims;
pub use jwt::{mint_access_token, verify_access_token, verify_access_token_at, TokenError};
pub use password::{hash_password, verify_password};
