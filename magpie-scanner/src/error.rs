use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiscoverError {
    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Other error: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, DiscoverError>;
