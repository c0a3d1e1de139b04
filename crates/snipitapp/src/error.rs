use thiserror::Error;

/// Reasons a snippet draft cannot become a stored snippet.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title is required")]
    MissingTitle,

    #[error("Code is required")]
    MissingCode,
}

/// Failures reported by a metadata completion service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    #[error("Completion service unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed completion response: {0}")]
    Malformed(String),

    #[error("Completion failed: {0}")]
    Service(String),
}

#[derive(Error, Debug)]
pub enum SnipitError {
    #[error("Snippet not found: {0}")]
    SnippetNotFound(String),

    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    #[error("No collection selected. Add or select a collection first")]
    NoCollection,

    #[error("Invalid snippet: {0}")]
    Validation(#[from] ValidationError),

    #[error("Metadata completion failed: {0}")]
    Completion(#[from] CompletionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, SnipitError>;
