//! # CLI Module
//!
//! User-facing command implementations for `genrecli`:
//!
//! - [`auth`] - OAuth 2.0 PKCE flow against the Spotify accounts service
//! - [`analyze`] - fetches a playlist, resolves every primary artist's
//!   genres through the on-disk cache and prints per-track and per-genre
//!   report tables; the genre grouping is saved for later playlist creation
//! - [`playlist`] - builds a new playlist from selected genre buckets of the
//!   last analysis, optionally with a cover image
//! - [`logout`] - removes the token and every derived cache
//!
//! Each command loads its state explicitly (token manager, genre cache,
//! genre groups), delegates the remote work to [`crate::spotify`] and
//! handles user feedback with progress bars and the colored output macros.
//! Failures are scoped to the current command; caches stay intact so a
//! retry can pick up where the failed run left off.

mod analyze;
mod auth;
mod logout;
mod playlist;

pub use analyze::analyze;
pub use auth::auth;
pub use logout::logout;
pub use playlist::playlist;
