use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchbookError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cannot read {path}: {source}")]
    Unreadable {
        path: String,
        source: std::io::Error,
    },

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, MatchbookError>;
