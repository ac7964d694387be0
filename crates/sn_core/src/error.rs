use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid ticker: {0}")]
    InvalidTicker(String),

    #[error("Feed error: {0}")]
    Feed(String),

    #[error("Lookup error: {0}")]
    Lookup(String),

    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

/// Failure kinds a completion backend can report. The batching engine
/// dispatches on these instead of sniffing provider error strings; it is
/// the client's job to map its wire format onto this enum.
#[derive(Error, Debug)]
pub enum CompletionError {
    /// The provider refused the request for throughput reasons. `retry_after`
    /// is how long the provider asked us to wait before the next attempt.
    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    /// The prompt did not fit the model's context window, as judged by the
    /// provider itself rather than by our local estimate.
    #[error("prompt exceeds the model context window")]
    ContextLengthExceeded,

    /// Anything else: auth failures, malformed responses, transport errors.
    #[error("API error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, Error>;
