//! Typed errors for the lectio library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can match
//! on failure kinds; the binary wraps these with `anyhow` context.

use thiserror::Error;

/// Errors that can occur in the readings pipeline.
#[derive(Debug, Error)]
pub enum LectioError {
    /// Transport-level fetch failure
    #[error("fetch failed for {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Upstream returned a non-success status
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// Document parsed to zero liturgical sections
    #[error("no readings found in document")]
    EmptyReadings,

    /// Art metadata from the model could not be parsed
    #[error("art metadata parse error: {0}")]
    ArtParse(String),

    /// LLM provider failed
    #[error("LLM provider error: {0}")]
    Provider(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// PDF rendering failed
    #[error("PDF rendering failed: {0}")]
    Pdf(String),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),

    /// Local file I/O failure
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<openai_client::OpenAIError> for LectioError {
    fn from(err: openai_client::OpenAIError) -> Self {
        LectioError::Provider(Box::new(err))
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, LectioError>;
