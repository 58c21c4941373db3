mod genres;
mod groups;
mod token;

pub use genres::GenreCacheManager;
pub use groups::GenreGroupsManager;
pub use token::AuthError;
pub use token::TokenManager;
pub use token::token_expired;

use std::io::Error;

/// Errors raised by the on-disk cache managers.
#[derive(Debug)]
pub enum CacheError {
    IoError(Error),
    SerdeError(serde_json::Error),
}

impl From<Error> for CacheError {
    fn from(err: Error) -> Self {
        CacheError::IoError(err)
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::SerdeError(err)
    }
}

impl std::fmt::Display for CacheError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheError::IoError(e) => write!(f, "io error: {}", e),
            CacheError::SerdeError(e) => write!(f, "serde error: {}", e),
        }
    }
}
