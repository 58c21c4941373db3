use std::{future::Future, time::Duration};

use reqwest::{Client, StatusCode, header::HeaderMap};
use tokio::time::sleep;

use crate::{
    config,
    management::{GenreCacheManager, TokenManager},
    spotify::FetchError,
    types::Artist,
    warning,
};

/// Fallback wait when a 429 response carries no usable Retry-After header.
const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(1);

/// Reads the server-directed wait duration from a 429 response.
pub fn parse_retry_after(headers: &HeaderMap) -> Duration {
    let secs = headers
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    match secs {
        Some(s) => Duration::from_secs(s),
        None => DEFAULT_RETRY_AFTER,
    }
}

/// Fetches the genre tags of one artist. A single attempt, no retries.
///
/// Status mapping:
/// - 429 becomes [`FetchError::RateLimited`] carrying the `Retry-After` wait
/// - 404 becomes an empty genre list, so one stale artist id cannot abort a
///   whole playlist scan
/// - any other non-success status becomes [`FetchError::Status`]
pub async fn get_artist_genres(token: &str, artist_id: &str) -> Result<Vec<String>, FetchError> {
    let api_url = format!(
        "{uri}/artists/{id}",
        uri = &config::spotify_apiurl(),
        id = artist_id
    );

    let client = Client::new();
    let response = client.get(&api_url).bearer_auth(token).send().await?;

    match response.status() {
        StatusCode::TOO_MANY_REQUESTS => Err(FetchError::RateLimited {
            retry_after: parse_retry_after(response.headers()),
        }),
        StatusCode::NOT_FOUND => Ok(Vec::new()),
        status if !status.is_success() => Err(FetchError::Status(status)),
        _ => {
            let artist = response.json::<Artist>().await?;
            Ok(artist.genres)
        }
    }
}

/// Memoized genre lookup over an arbitrary remote lookup function.
///
/// - Cache hit: returns the stored list with zero lookups.
/// - Cache miss: exactly one successful lookup; an empty result is stored as
///   the `["Unknown"]` sentinel so the miss is never re-attempted.
/// - [`FetchError::RateLimited`]: sleeps the server-directed duration and
///   retries the identical request. `max_wait` caps the cumulative wait;
///   `None` means unbounded patience. Exceeding the cap yields
///   [`FetchError::RateLimitTimeout`] - giving up silently would misclassify
///   the track, so the scan aborts loudly instead.
/// - Any other error propagates and nothing is cached.
pub async fn resolve_with<F, Fut>(
    cache: &mut GenreCacheManager,
    artist_id: &str,
    max_wait: Option<Duration>,
    mut lookup: F,
) -> Result<Vec<String>, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Vec<String>, FetchError>>,
{
    if let Some(genres) = cache.get(artist_id) {
        return Ok(genres.clone());
    }

    let mut waited = Duration::ZERO;

    loop {
        match lookup().await {
            Ok(genres) => {
                let genres = if genres.is_empty() {
                    vec!["Unknown".to_string()]
                } else {
                    genres
                };
                cache.insert(artist_id.to_string(), genres.clone());
                return Ok(genres);
            }
            Err(FetchError::RateLimited { retry_after }) => {
                if let Some(cap) = max_wait {
                    if waited + retry_after > cap {
                        return Err(FetchError::RateLimitTimeout { waited });
                    }
                }
                sleep(retry_after).await;
                waited += retry_after;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Resolves the genre tags of an artist through the on-disk cache.
///
/// Drives [`resolve_with`] with a real HTTP lookup and persists the cache
/// after each new entry, so an interrupted scan keeps the lookups it already
/// paid for.
pub async fn resolve_genres(
    token_mgr: &mut TokenManager,
    cache: &mut GenreCacheManager,
    artist_id: &str,
    max_wait: Option<Duration>,
) -> Result<Vec<String>, FetchError> {
    if let Some(genres) = cache.get(artist_id) {
        return Ok(genres.clone());
    }

    let token = token_mgr.get_valid_token().await?;
    let id = artist_id.to_string();

    let genres = resolve_with(cache, artist_id, max_wait, || {
        let token = token.clone();
        let id = id.clone();
        async move { get_artist_genres(&token, &id).await }
    })
    .await?;

    if let Err(e) = cache.persist().await {
        warning!("Cannot persist genre cache: {}", e);
    }

    Ok(genres)
}
