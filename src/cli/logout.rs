use crate::{
    management::{GenreCacheManager, GenreGroupsManager, TokenManager},
    success, warning,
};

/// Deletes the persisted token and every cache derived from the session.
///
/// Idempotent: a second logout succeeds with nothing left to remove. The
/// genre cache goes too, so future scans aren't biased by lookups made
/// under a revoked identity.
pub async fn logout() {
    if let Err(e) = TokenManager::clear().await {
        warning!("Cannot remove token cache: {}", e);
    }
    if let Err(e) = GenreCacheManager::clear().await {
        warning!("Cannot remove genre cache: {}", e);
    }
    if let Err(e) = GenreGroupsManager::clear().await {
        warning!("Cannot remove genre groups: {}", e);
    }

    success!("Logged out.");
}
