use thiserror::Error;

/// Main error type for Testwarden operations
#[derive(Error, Debug)]
pub enum TestwardenError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Branch or file not found: {0}")]
    NotFound(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Issue resolution error: {0}")]
    Resolver(String),
}

pub type Result<T> = std::result::Result<T, TestwardenError>;
