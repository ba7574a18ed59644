use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The call did not complete before the configured timeout, and was
    /// aborted.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The server answered with a non-2xx status code.
    #[error("HTTP error, status code {0}")]
    HttpStatus(u16),

    /// Connection refused, DNS failure, broken stream,...
    #[error("{0}")]
    Network(String),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
