use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to parse stored data, error: {0}")]
    ParseError(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Deserialization error: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("MixQ server returned {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("Server could not play track {track_id}: {reason}")]
    PlaybackRejected { track_id: String, reason: String },

    #[error("Queue is empty, load a playlist first")]
    EmptyQueue,

    #[error("No playlist selected")]
    MissingPlaylist,

    #[error("Unknown time zone: {0}")]
    UnknownTimeZone(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] async_duckdb::Error),
}

impl From<std::env::VarError> for Error {
    fn from(err: std::env::VarError) -> Self {
        Error::ConfigurationError(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::ConfigurationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
