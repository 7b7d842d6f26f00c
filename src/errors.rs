use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream responded with {status}: {body}")]
    Upstream { status: StatusCode, body: String },

    #[error("Failed to decode upstream response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Upstream response is missing `{0}`")]
    MissingField(&'static str),

    #[error("No artist found for \"{0}\"")]
    ArtistNotFound(String),

    #[error("Artist {0} has no top tracks")]
    NoTopTracks(String),

    #[error("Country dataset error: {0}")]
    Dataset(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<std::env::VarError> for Error {
    fn from(err: std::env::VarError) -> Self {
        Error::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
