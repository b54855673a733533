//! Insight generation error types.

use thiserror::Error;

/// Why a generator call produced no payload.
///
/// These never reach cache callers: the cache turns them into a fallback
/// payload marked `generation_failed`.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The API returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The API answered without any candidate text.
    #[error("empty response from generator")]
    EmptyResponse,

    /// The generator task panicked or was aborted.
    #[error("generator task failed: {0}")]
    Join(String),

    #[error("{0}")]
    Other(String),
}
