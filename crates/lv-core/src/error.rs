use thiserror::Error;

#[derive(Error, Debug)]
pub enum VeilError {
    #[error("Source is empty: paste some code to obfuscate")]
    EmptyInput,
    #[error("Source too large: {len} bytes exceeds the {max} byte limit")]
    InputTooLarge { len: usize, max: usize },
    #[error("Run cancelled before processing started")]
    Cancelled,
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, VeilError>;
