use thiserror::Error;

/// Error for ArticleTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TitleError {
    #[error("Title must not be empty")]
    Empty,

    #[error("Title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for Slug validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SlugError {
    #[error("Slug must not be empty")]
    Empty,

    #[error("Slug too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Slug contains invalid characters (only alphanumeric, underscore, and hyphen allowed)")]
    InvalidCharacters,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown article status: {0}")]
pub struct StatusError(pub String);

/// Top-level error for all article-related operations
#[derive(Debug, Clone, Error)]
pub enum ArticleError {
    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] TitleError),

    #[error("Invalid slug: {0}")]
    InvalidSlug(#[from] SlugError),

    #[error("Content must not be empty")]
    EmptyContent,

    #[error("Article not found: {0}")]
    NotFound(String),

    #[error("Article {0} is not accessible to this user")]
    Forbidden(String),

    /// The token subject no longer maps to a stored user.
    #[error("Requesting user not found: {0}")]
    RequesterNotFound(String),

    #[error("Slug already exists: {0}")]
    SlugAlreadyExists(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<StatusError> for ArticleError {
    fn from(err: StatusError) -> Self {
        ArticleError::DatabaseError(err.to_string())
    }
}
