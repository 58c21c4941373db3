use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use genrecli::spotify::{FetchError, playlist::collect_tracks};
use genrecli::types::{PlaylistItem, PlaylistTracksResponse, Track, TrackArtist};

// Helper function to create a test track
fn create_test_track(index: usize) -> Track {
    Track {
        name: format!("Track {}", index),
        uri: format!("spotify:track:{}", index),
        duration_ms: 180_000,
        popularity: Some(50),
        artists: vec![TrackArtist {
            id: Some(format!("artist_{}", index)),
            name: format!("Artist {}", index),
        }],
    }
}

// Helper function to create a page of `count` live tracks starting at `offset`
fn create_test_page(offset: usize, count: usize, has_next: bool) -> PlaylistTracksResponse {
    PlaylistTracksResponse {
        items: (0..count)
            .map(|i| PlaylistItem {
                track: Some(create_test_track(offset + i)),
            })
            .collect(),
        next: has_next.then(|| "https://api.example.com/next".to_string()),
        total: None,
    }
}

#[tokio::test]
async fn test_collect_tracks_stops_on_no_next_page() {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = Arc::clone(&calls);

    let tracks = collect_tracks(
        move |offset| {
            let calls = Arc::clone(&calls_clone);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                // two full pages, then a final short one
                let page = match offset {
                    0 => create_test_page(0, 100, true),
                    100 => create_test_page(100, 100, true),
                    200 => create_test_page(200, 30, false),
                    other => panic!("unexpected offset {}", other),
                };
                Ok::<_, FetchError>(page)
            }
        },
        None,
    )
    .await
    .unwrap();

    assert_eq!(tracks.len(), 230);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(tracks[0].name, "Track 0");
    assert_eq!(tracks[229].name, "Track 229");
}

#[tokio::test]
async fn test_collect_tracks_truncates_at_cap_not_page_boundary() {
    let tracks = collect_tracks(
        |offset| async move {
            // the server would happily keep serving pages
            Ok::<_, FetchError>(create_test_page(offset, 100, true))
        },
        Some(250),
    )
    .await
    .unwrap();

    assert_eq!(tracks.len(), 250);
    assert_eq!(tracks[249].name, "Track 249");
}

#[tokio::test]
async fn test_collect_tracks_cap_zero_issues_no_request() {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = Arc::clone(&calls);

    let tracks = collect_tracks(
        move |offset| {
            let calls = Arc::clone(&calls_clone);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, FetchError>(create_test_page(offset, 100, true))
            }
        },
        Some(0),
    )
    .await
    .unwrap();

    assert!(tracks.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_collect_tracks_skips_null_entries() {
    let tracks = collect_tracks(
        |_offset| async move {
            let mut page = create_test_page(0, 3, false);
            // a removed playlist entry comes back with a null track
            page.items.insert(1, PlaylistItem { track: None });
            Ok::<_, FetchError>(page)
        },
        None,
    )
    .await
    .unwrap();

    assert_eq!(tracks.len(), 3);
    assert_eq!(tracks[1].name, "Track 1");
}

#[tokio::test]
async fn test_collect_tracks_offset_advances_by_raw_page_length() {
    // null entries still count towards the next page's offset
    let offsets = Arc::new(std::sync::Mutex::new(Vec::new()));
    let offsets_clone = Arc::clone(&offsets);

    let tracks = collect_tracks(
        move |offset| {
            let offsets = Arc::clone(&offsets_clone);
            async move {
                offsets.lock().unwrap().push(offset);
                let mut page = create_test_page(offset, 2, offset == 0);
                page.items.push(PlaylistItem { track: None });
                Ok::<_, FetchError>(page)
            }
        },
        None,
    )
    .await
    .unwrap();

    assert_eq!(tracks.len(), 4);
    assert_eq!(*offsets.lock().unwrap(), vec![0, 3]);
}

#[tokio::test]
async fn test_collect_tracks_propagates_errors() {
    let result = collect_tracks(
        |_offset| async move {
            Err::<PlaylistTracksResponse, FetchError>(FetchError::Status(
                reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            ))
        },
        None,
    )
    .await;

    assert!(matches!(result, Err(FetchError::Status(_))));
}
