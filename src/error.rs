use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unexpected response format (content type {content_type:?})")]
    UnexpectedResponseFormat { content_type: Option<String> },

    #[error("station error: {0}")]
    Station(String),

    #[error("requested stream does not exist")]
    NoSuchStream,

    #[error("invalid station endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    #[error("invalid station response")]
    Decode(#[from] serde_json::Error),

    #[error("HTTP response too large ({0} bytes)")]
    TooLarge(u64),
}
