use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrendlineError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("storage error: {0}")]
    Store(String),

    #[error("io error: {0}")]
    Io(String),
}

pub type Result<T> = std::result::Result<T, TrendlineError>;
