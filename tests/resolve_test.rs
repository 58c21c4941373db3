use std::{
    future::Future,
    pin::Pin,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use genrecli::management::GenreCacheManager;
use genrecli::spotify::{FetchError, artists::resolve_with};

// Lookup stub that counts its invocations and replays a fixed script of
// results, one per attempt.
fn scripted_lookup(
    calls: Arc<AtomicUsize>,
    script: Vec<Result<Vec<String>, Duration>>,
) -> impl FnMut() -> Pin<Box<dyn Future<Output = Result<Vec<String>, FetchError>>>> {
    move || {
        let attempt = calls.fetch_add(1, Ordering::SeqCst);
        let step = script
            .get(attempt)
            .cloned()
            .expect("lookup called more often than scripted");
        Box::pin(async move {
            match step {
                Ok(genres) => Ok(genres),
                Err(retry_after) => Err(FetchError::RateLimited { retry_after }),
            }
        })
    }
}

#[tokio::test]
async fn test_resolve_miss_issues_exactly_one_lookup() {
    let mut cache = GenreCacheManager::new();
    let calls = Arc::new(AtomicUsize::new(0));

    let first = resolve_with(
        &mut cache,
        "artist-a",
        None,
        scripted_lookup(Arc::clone(&calls), vec![Ok(vec!["synthpop".to_string()])]),
    )
    .await
    .unwrap();

    let second = resolve_with(
        &mut cache,
        "artist-a",
        None,
        scripted_lookup(Arc::clone(&calls), vec![]),
    )
    .await
    .unwrap();

    assert_eq!(first, vec!["synthpop"]);
    assert_eq!(second, first);
    // the second resolve was served from the cache
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_resolve_stores_unknown_sentinel_for_empty_result() {
    let mut cache = GenreCacheManager::new();
    let calls = Arc::new(AtomicUsize::new(0));

    let genres = resolve_with(
        &mut cache,
        "artist-a",
        None,
        scripted_lookup(Arc::clone(&calls), vec![Ok(Vec::new())]),
    )
    .await
    .unwrap();

    assert_eq!(genres, vec!["Unknown"]);
    assert_eq!(
        cache.get("artist-a"),
        Some(&vec!["Unknown".to_string()])
    );

    // the sentinel keeps the miss from being re-attempted
    let again = resolve_with(
        &mut cache,
        "artist-a",
        None,
        scripted_lookup(Arc::clone(&calls), vec![]),
    )
    .await
    .unwrap();
    assert_eq!(again, vec!["Unknown"]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_resolve_waits_out_rate_limit_then_retries() {
    let mut cache = GenreCacheManager::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let start = tokio::time::Instant::now();

    let genres = resolve_with(
        &mut cache,
        "artist-a",
        None,
        scripted_lookup(
            Arc::clone(&calls),
            vec![
                Err(Duration::from_secs(2)),
                Ok(vec!["synthpop".to_string()]),
            ],
        ),
    )
    .await
    .unwrap();

    assert_eq!(genres, vec!["synthpop"]);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    // the scan suspended for the server-directed wait
    assert!(start.elapsed() >= Duration::from_secs(2));

    // the artist is cached now; no further lookups in the same run
    let again = resolve_with(
        &mut cache,
        "artist-a",
        None,
        scripted_lookup(Arc::clone(&calls), vec![]),
    )
    .await
    .unwrap();
    assert_eq!(again, vec!["synthpop"]);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_resolve_survives_repeated_rate_limits() {
    let mut cache = GenreCacheManager::new();
    let calls = Arc::new(AtomicUsize::new(0));

    let genres = resolve_with(
        &mut cache,
        "artist-a",
        None,
        scripted_lookup(
            Arc::clone(&calls),
            vec![
                Err(Duration::from_secs(1)),
                Err(Duration::from_secs(3)),
                Err(Duration::from_secs(5)),
                Ok(vec!["tango".to_string()]),
            ],
        ),
    )
    .await
    .unwrap();

    assert_eq!(genres, vec!["tango"]);
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[tokio::test(start_paused = true)]
async fn test_resolve_respects_cumulative_wait_cap() {
    let mut cache = GenreCacheManager::new();
    let calls = Arc::new(AtomicUsize::new(0));

    let result = resolve_with(
        &mut cache,
        "artist-a",
        Some(Duration::from_secs(5)),
        scripted_lookup(
            Arc::clone(&calls),
            vec![
                Err(Duration::from_secs(4)),
                Err(Duration::from_secs(4)),
                Ok(vec!["never reached".to_string()]),
            ],
        ),
    )
    .await;

    // the second wait would push the total past the cap
    assert!(matches!(result, Err(FetchError::RateLimitTimeout { .. })));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    // nothing was cached for the aborted lookup
    assert!(cache.get("artist-a").is_none());
}

#[tokio::test]
async fn test_resolve_propagates_other_errors_without_caching() {
    let mut cache = GenreCacheManager::new();

    let result = resolve_with(&mut cache, "artist-a", None, || {
        Box::pin(async {
            Err::<Vec<String>, FetchError>(FetchError::Status(
                reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            ))
        })
    })
    .await;

    assert!(matches!(result, Err(FetchError::Status(_))));
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_resolve_hit_never_calls_lookup() {
    let mut cache = GenreCacheManager::new();
    cache.insert("artist-a".to_string(), vec!["jazz".to_string()]);

    let genres = resolve_with(
        &mut cache,
        "artist-a",
        None,
        || -> Pin<Box<dyn Future<Output = Result<Vec<String>, FetchError>>>> {
            Box::pin(async { panic!("lookup must not run on a cache hit") })
        },
    )
    .await
    .unwrap();

    assert_eq!(genres, vec!["jazz"]);
    assert_eq!(cache.len(), 1);
}
