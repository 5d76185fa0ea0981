use thiserror::Error;

pub type Result<T> = std::result::Result<T, TcError>;

#[derive(Debug, Error)]
pub enum TcError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("caption timestamp out of range: {0} ms")]
    TimeOverflow(i64),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
