//! Core error types for buzufba-core

use buzufba_api::FieldErrors;
use buzufba_db::DbError;
use thiserror::Error;

/// A request that breaks a business rule
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct BadRequestError {
    message: String,
}

impl BadRequestError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A requested resource that does not exist
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct NotFoundError {
    message: String,
}

impl NotFoundError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Inbound data that failed its schema
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("validation failed for {} field(s)", errors.len())]
pub struct ValidationError {
    errors: FieldErrors,
}

impl ValidationError {
    #[must_use]
    pub fn new(errors: FieldErrors) -> Self {
        Self { errors }
    }

    /// Violations grouped by field path
    #[must_use]
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }
}

impl From<FieldErrors> for ValidationError {
    fn from(errors: FieldErrors) -> Self {
        Self::new(errors)
    }
}

/// Errors returned by route service operations
#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    BadRequest(#[from] BadRequestError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// Route store failure
    #[error("route store error: {0}")]
    Storage(#[from] DbError),
}
