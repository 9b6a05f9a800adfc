use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid cutoff date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("Extract failed: {0}")]
    Extract(#[source] sqlx::Error),

    #[error("Transform failed at row {row}: {message}")]
    Transform { row: usize, message: String },

    #[error("Load failed: {0}")]
    Load(#[source] sqlx::Error),

    #[error("Transaction error: {0}")]
    Transaction(#[source] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, EtlError>;
