//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use crate::error::AppError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://bookshelf.db?mode=rwc";

/// Settings read once at startup.
#[derive(Clone)]
pub struct AppConfig {
    // Server configuration
    pub host: String,
    pub port: u16,

    // Database configuration
    pub database_url: String,

    // Security configuration
    pub jwt_secret: String,
}

/// Merge a `.env` file from the working directory (or a parent) into the
/// process environment. Variables that are already set keep their values.
/// Returns the file that was read, if any.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

impl AppConfig {
    /// Load and validate configuration from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("BACKEND_HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("BACKEND_PORT") {
            Some(port_str) => port_str.trim().parse::<u16>().map_err(|_| {
                AppError::config(format!(
                    "BACKEND_PORT must be a valid port number, got '{port_str}'"
                ))
            })?,
            None => DEFAULT_PORT,
        };

        let database_url = lookup("DATABASE_URL")
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let jwt_secret = match lookup("BACKEND_JWT_SECRET") {
            Some(secret) if !secret.is_empty() => secret,
            Some(_) => return Err(AppError::config("BACKEND_JWT_SECRET must not be empty")),
            None => return Err(AppError::config("BACKEND_JWT_SECRET must be set")),
        };

        Ok(AppConfig {
            host,
            port,
            database_url,
            jwt_secret,
        })
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &self.database_url)
            .field("jwt_secret", &"[REDACTED]")
            .finish()
    }
}
