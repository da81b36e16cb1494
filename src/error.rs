use thiserror::Error;

/// Main error type for the key search engine
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Unsupported cipher method: {0}")]
    UnsupportedMethod(String),

    #[error("Invalid alphabet: {0}")]
    InvalidAlphabet(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Invalid seed key: {0}")]
    InvalidSeed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("A search is already in progress")]
    SearchInProgress,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for search operations
pub type Result<T> = std::result::Result<T, SearchError>;
