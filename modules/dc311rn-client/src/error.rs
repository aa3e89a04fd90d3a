use thiserror::Error;

pub type Result<T> = std::result::Result<T, Dc311Error>;

#[derive(Debug, Error)]
pub enum Dc311Error {
    /// No service request exists under the requested number (HTTP 404).
    #[error("service request not found")]
    NotFound,

    /// The 311 upstream behind the API timed out (HTTP 504).
    #[error("upstream unavailable")]
    Unavailable,

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for Dc311Error {
    fn from(err: reqwest::Error) -> Self {
        Dc311Error::Network(err.to_string())
    }
}

impl From<serde_json::Error> for Dc311Error {
    fn from(err: serde_json::Error) -> Self {
        Dc311Error::Parse(err.to_string())
    }
}
