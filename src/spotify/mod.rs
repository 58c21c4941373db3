//! # Spotify Integration Module
//!
//! Client layer for the Spotify Web API operations the classifier needs:
//! OAuth 2.0 PKCE authentication, paginated playlist-track retrieval, artist
//! genre lookup with rate-limit aware retries, and playlist creation.
//!
//! ## Submodules
//!
//! - [`auth`] - the complete PKCE flow: verifier/challenge generation, local
//!   callback server, browser launch, code exchange and token persistence
//! - [`artists`] - artist genre lookup backed by the on-disk memoization
//!   cache, absorbing HTTP 429 backoff with server-directed waits
//! - [`playlist`] - paginated track listing with an exact item cap, playlist
//!   creation, track insertion in chunks and cover-image upload
//!
//! ## Error handling
//!
//! Rate limiting (429 + `Retry-After`) is recoverable and always retried up
//! to a caller-configured cumulative wait. A 404 on an artist lookup is
//! treated as "no genres" so one stale id cannot abort a whole scan. Any
//! other upstream failure surfaces as a [`FetchError`] and aborts the
//! current operation; local caches stay intact for retry.

use std::time::Duration;

use reqwest::StatusCode;

use crate::management::AuthError;

pub mod artists;
pub mod auth;
pub mod playlist;

/// Errors from remote fetch operations.
#[derive(Debug)]
pub enum FetchError {
    /// Network or protocol failure from the HTTP client.
    Http(reqwest::Error),
    /// Non-success status with no dedicated handling.
    Status(StatusCode),
    /// HTTP 429 with the server-directed wait duration.
    RateLimited { retry_after: Duration },
    /// The cumulative rate-limit wait exceeded the configured cap.
    RateLimitTimeout { waited: Duration },
    /// No valid session; re-authorization required.
    Auth(AuthError),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Http(e) => write!(f, "http error: {}", e),
            FetchError::Status(code) => write!(f, "unexpected status: {}", code),
            FetchError::RateLimited { retry_after } => {
                write!(f, "rate limited, retry after {}s", retry_after.as_secs())
            }
            FetchError::RateLimitTimeout { waited } => write!(
                f,
                "gave up after waiting {}s on rate limits",
                waited.as_secs()
            ),
            FetchError::Auth(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Http(err)
    }
}

impl From<AuthError> for FetchError {
    fn from(err: AuthError) -> Self {
        FetchError::Auth(err)
    }
}
