use thiserror::Error;

/// Failures of the single page fetch that precedes every analysis run.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request timeout: URL took longer than {0}s to respond")]
    Timeout(u64),

    #[error("Connection failed: Unable to reach {0}")]
    ConnectionFailed(String),

    #[error("HTTP Error {status}: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Failed to fetch URL: {0}")]
    Request(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("LLM API error: {0}")]
    LLMApi(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Fetch(FetchError::Timeout(_)) | Error::Fetch(FetchError::ConnectionFailed(_))
        )
    }
}

impl FetchError {
    /// Classifies a transport error raised while fetching `url`.
    pub fn classify(err: reqwest::Error, url: &str, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(timeout_secs)
        } else if err.is_connect() {
            FetchError::ConnectionFailed(url.to_string())
        } else if let Some(status) = err.status() {
            FetchError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            }
        } else {
            FetchError::Request(err.to_string())
        }
    }
}
