//! Account signup and credential login.

use std::time::SystemTime;

use sea_orm::ConnectionTrait;
use tracing::{debug, info};

use crate::auth::jwt::mint_access_token;
use crate::auth::password::{
    hash_password_blocking, verify_against_dummy_blocking, verify_password_blocking,
};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::security;
use crate::repos::users::{self, User};
use crate::state::security_config::SecurityConfig;

/// Usernames longer than this are rejected at signup.
pub const MAX_USERNAME_LEN: usize = 64;

fn validate_username(username: &str) -> Result<&str, AppError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(AppError::invalid(
            ErrorCode::InvalidUsername,
            "Username cannot be empty",
        ));
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(AppError::invalid(
            ErrorCode::InvalidUsername,
            format!("Username must be at most {MAX_USERNAME_LEN} characters"),
        ));
    }
    Ok(username)
}

fn validate_password(password: &str) -> Result<(), AppError> {
    if password.is_empty() {
        return Err(AppError::invalid(
            ErrorCode::InvalidPassword,
            "Password cannot be empty",
        ));
    }
    Ok(())
}

/// Create an account storing only the password hash.
pub async fn signup(
    conn: &(impl ConnectionTrait + Send + Sync),
    username: &str,
    password: &str,
) -> Result<User, AppError> {
    let username = validate_username(username)?;
    validate_password(password)?;

    let password_hash = hash_password_blocking(password.to_string()).await?;
    let user = users::create_user(conn, username, &password_hash).await?;

    info!(user_id = user.id, username = %user.username, "User created");
    Ok(user)
}

/// Check credentials and mint an access token.
///
/// Unknown usernames and wrong passwords produce the same error and cost one
/// hash verification each.
pub async fn login(
    conn: &(impl ConnectionTrait + Send + Sync),
    security_config: &SecurityConfig,
    username: &str,
    password: &str,
) -> Result<String, AppError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AppError::invalid_credentials());
    }

    let Some(user) = users::find_user_by_username(conn, username).await? else {
        verify_against_dummy_blocking(password.to_string()).await;
        security::login_failed("unknown_user", username);
        return Err(AppError::invalid_credentials());
    };

    if !verify_password_blocking(password.to_string(), user.password_hash.clone()).await {
        security::login_failed("password_mismatch", username);
        return Err(AppError::invalid_credentials());
    }

    let token = mint_access_token(&user.username, SystemTime::now(), security_config)?;
    debug!(user_id = user.id, "Issued access token");
    Ok(token)
}
