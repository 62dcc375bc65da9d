use thiserror::Error;

#[derive(Debug, Error)]
pub enum NoteError {
    #[error("invalid note config: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    #[error("{field} must be between 1 and {max} ms, got {value}")]
    InvalidDelay {
        field: &'static str,
        value: u32,
        max: u32,
    },

    #[error("could not encode {key}: {source}")]
    Encode {
        key: String,
        source: serde_json::Error,
    },

    #[error("localStorage unavailable")]
    StorageUnavailable,

    #[error("localStorage write failed for {key}")]
    Storage { key: String },
}

pub type NoteResult<T> = Result<T, NoteError>;
