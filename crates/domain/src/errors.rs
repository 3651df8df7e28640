use thiserror::Error;

use crate::forms::ValidationErrors;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("validation failed")]
    Validation(ValidationErrors),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("not the resource owner")]
    Forbidden,

    /// A store-level unique constraint fired after the form pre-check
    /// passed. Converted back into a field error before it reaches a
    /// handler.
    #[error("{field} is already in use")]
    Conflict { field: &'static str },

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Failed password hashing: {0}")]
    PasswordHash(String),

    #[error("Unsupported image format: {0}")]
    UnsupportedImage(String),
}
