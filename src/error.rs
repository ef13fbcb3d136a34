//! Error types for video generation

use thiserror::Error;

/// Result type alias for generation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while turning input into a video document
#[derive(Error, Debug)]
pub enum Error {
    /// Neither a URL nor custom text was supplied
    #[error("Please provide either newsUrl or customText")]
    MissingInput,

    /// The request body could not be understood
    #[error("Invalid request body: {0}")]
    InvalidRequest(String),

    /// Fetching or reading the article failed
    #[error("Failed to fetch news content: {0}")]
    Extraction(#[from] FetchError),

    /// The fetched body could not be queried as HTML
    #[error("HTML parsing failed: {0}")]
    ParseError(String),

    /// Failed to render the document
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Failed to set up a component (HTTP client, server socket, worker)
    #[error("Initialization failed: {0}")]
    InitializationError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// HTTP status the request boundary reports for this error.
    ///
    /// Input problems are the caller's fault (400); everything else is a
    /// server-side failure (500).
    pub fn status_code(&self) -> u16 {
        match self {
            Error::MissingInput | Error::InvalidRequest(_) => 400,
            _ => 500,
        }
    }
}

/// Errors raised by an [`HttpFetcher`](crate::extract::HttpFetcher)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The URL is not an absolute http(s) URL
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The request did not complete in time
    #[error("timeout of {0}ms exceeded")]
    Timeout(u64),

    /// The server answered with a non-success status
    #[error("Request failed with status code {0}")]
    Status(u16),

    /// Connection-level failure (DNS, refused, TLS, ...)
    #[error("{0}")]
    Network(String),

    /// The response body could not be read as text
    #[error("failed to read response body: {0}")]
    Body(String),
}
