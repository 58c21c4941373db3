use std::{future::Future, time::Duration};

use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{
    config,
    management::TokenManager,
    spotify::FetchError,
    types::{
        AddTracksToPlaylistRequest, AddTracksToPlaylistResponse, CreatePlaylistRequest,
        CreatePlaylistResponse, PlaylistTracksResponse, Track,
    },
};

/// Spotify caps playlist-track pages at 100 items.
const PAGE_SIZE: u64 = 100;

/// Collects all pages of a paginated track listing.
///
/// `get_page` is called with the item offset of the next page. Pages are
/// requested until the server reports no `next` page or `max_tracks` is
/// reached; the final page is truncated so the cap is honored exactly, not
/// at a page boundary. Null/removed entries are skipped instead of failing
/// the fetch. With `max_tracks = Some(0)` no page is requested at all.
///
/// Termination relies on the server's "no next page" signal (plus an empty
/// page, which can carry no further offset). A server that reports a bogus
/// `next` forever is an external-collaborator risk this function does not
/// correct.
pub async fn collect_tracks<F, Fut, E>(
    mut get_page: F,
    max_tracks: Option<usize>,
) -> Result<Vec<Track>, E>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<PlaylistTracksResponse, E>>,
{
    let mut tracks: Vec<Track> = Vec::new();

    if max_tracks == Some(0) {
        return Ok(tracks);
    }

    let mut offset: usize = 0;

    loop {
        let page = get_page(offset).await?;
        let page_len = page.items.len();

        for item in page.items {
            // removed or unavailable entries come back as null tracks
            if let Some(track) = item.track {
                tracks.push(track);
                if let Some(cap) = max_tracks {
                    if tracks.len() >= cap {
                        return Ok(tracks);
                    }
                }
            }
        }

        if page.next.is_none() || page_len == 0 {
            return Ok(tracks);
        }

        offset += page_len;
    }
}

/// Fetches every track of a playlist, optionally capped at `max_tracks`.
pub async fn get_playlist_tracks(
    token_mgr: &mut TokenManager,
    playlist_id: &str,
    max_tracks: Option<usize>,
) -> Result<Vec<Track>, FetchError> {
    let token = token_mgr.get_valid_token().await?;
    let playlist_id = playlist_id.to_string();

    collect_tracks(
        |offset| {
            let token = token.clone();
            let playlist_id = playlist_id.clone();
            async move { get_tracks_page(&token, &playlist_id, offset).await }
        },
        max_tracks,
    )
    .await
}

async fn get_tracks_page(
    token: &str,
    playlist_id: &str,
    offset: usize,
) -> Result<PlaylistTracksResponse, FetchError> {
    loop {
        let api_url = format!(
            "{uri}/playlists/{id}/tracks?limit={limit}&offset={offset}",
            uri = &config::spotify_apiurl(),
            id = playlist_id,
            limit = PAGE_SIZE,
            offset = offset
        );

        let client = Client::new();
        let response = client.get(&api_url).bearer_auth(token).send().await?;

        match response.status() {
            StatusCode::BAD_GATEWAY => {
                sleep(Duration::from_secs(10)).await;
                continue; // retry
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = super::artists::parse_retry_after(response.headers());
                sleep(retry_after).await;
                continue; // retry after the server-directed wait
            }
            status if !status.is_success() => return Err(FetchError::Status(status)),
            _ => return Ok(response.json::<PlaylistTracksResponse>().await?),
        }
    }
}

/// Creates a playlist for the configured user.
pub async fn create(
    token_mgr: &mut TokenManager,
    name: String,
    public: bool,
) -> Result<CreatePlaylistResponse, FetchError> {
    let token = token_mgr.get_valid_token().await?;
    let api_url = format!(
        "{uri}/users/{user}/playlists",
        uri = &config::spotify_apiurl(),
        user = &config::spotify_user()
    );

    let request = CreatePlaylistRequest {
        name,
        description: "Created with genrecli".to_string(),
        public,
        collaborative: false,
    };

    let client = Client::new();
    let response = client
        .post(&api_url)
        .bearer_auth(token)
        .json(&request)
        .send()
        .await?
        .error_for_status()?;

    Ok(response.json::<CreatePlaylistResponse>().await?)
}

/// Adds tracks to a playlist. Callers chunk the URI list to at most 100.
pub async fn add_tracks(
    token_mgr: &mut TokenManager,
    playlist_id: &str,
    uris: Vec<String>,
) -> Result<AddTracksToPlaylistResponse, FetchError> {
    let token = token_mgr.get_valid_token().await?;
    let api_url = format!(
        "{uri}/playlists/{id}/tracks",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );

    let client = Client::new();
    let response = client
        .post(&api_url)
        .bearer_auth(token)
        .json(&AddTracksToPlaylistRequest { uris })
        .send()
        .await?
        .error_for_status()?;

    Ok(response.json::<AddTracksToPlaylistResponse>().await?)
}

/// Uploads a JPEG cover image for a playlist (base64-encoded body).
pub async fn upload_cover(
    token_mgr: &mut TokenManager,
    playlist_id: &str,
    jpeg: &[u8],
) -> Result<(), FetchError> {
    let token = token_mgr.get_valid_token().await?;
    let api_url = format!(
        "{uri}/playlists/{id}/images",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );

    let client = Client::new();
    client
        .put(&api_url)
        .bearer_auth(token)
        .header("Content-Type", "image/jpeg")
        .body(STANDARD.encode(jpeg))
        .send()
        .await?
        .error_for_status()?;

    Ok(())
}
