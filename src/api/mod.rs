//! # API Module
//!
//! HTTP endpoints for the temporary local server that backs the OAuth flow:
//!
//! - [`callback`] - receives the authorization redirect from Spotify and
//!   completes the PKCE code exchange
//! - [`health`] - liveness check for the callback server
//!
//! Both handlers are plain [`axum`] async functions wired up by
//! [`crate::server::start_api_server`].

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
