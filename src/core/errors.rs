use thiserror::Error;

#[derive(Error, Debug)]
pub enum GlosorError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("Malformed vocabulary command: {0}")]
    MalformedCommand(String),

    #[error("Bulk replace rejected, entry {index}: {reason}")]
    BulkReplaceRejected { index: usize, reason: String },

    #[error("Couldn't import Vocabulary from url {url}: {message}")]
    ImportFetch { url: String, message: String },

    #[error("GlosorError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for GlosorError {
    fn from(error: std::io::Error) -> Self {
        GlosorError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for GlosorError {
    fn from(error: reqwest::Error) -> Self {
        GlosorError::Reqwest(Box::new(error))
    }
}
