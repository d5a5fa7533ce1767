use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown series status: {0}")]
    UnknownStatus(String),
    #[error("invalid upload date {value}: {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
