//! Error types for buzufba-db

use thiserror::Error;

/// Errors that can occur while talking to the route store
#[derive(Error, Debug)]
pub enum DbError {
    /// Query or connection failure reported by the driver
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Embedded migrations could not be applied
    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Invalid pool configuration
    #[error("invalid configuration: {0}")]
    ConfigError(String),

    /// Store cannot serve requests right now
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
