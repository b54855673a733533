//! Shared HTTP response helpers for the generator client.
//!
//! Centralizes status-code checks (429 rate limiting with `Retry-After`
//! parsing, non-success → [`GenerationError::Api`]) so request code stays
//! focused on building the call and mapping the body.

use crate::error::GenerationError;

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **429 Too Many Requests** → [`GenerationError::RateLimited`] with
///   `Retry-After` header parsing (falls back to 60 s if absent or
///   unparseable).
/// - **Non-success status** → [`GenerationError::Api`] with status code and
///   response body.
pub async fn check_response(
    resp: reqwest::Response,
) -> Result<reqwest::Response, GenerationError> {
    if resp.status() == 429 {
        return Err(GenerationError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !resp.status().is_success() {
        return Err(GenerationError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}
