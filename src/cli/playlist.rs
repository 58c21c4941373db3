use std::{collections::HashSet, path::PathBuf};

use crate::{
    error,
    genres::MacroGenre,
    info,
    management::{GenreGroupsManager, TokenManager},
    spotify, success, warning,
};

/// Creates a playlist from selected macro-genre buckets of the last scan.
pub async fn playlist(
    genres: Vec<String>,
    name: Option<String>,
    public: bool,
    cover: Option<PathBuf>,
) {
    let groups = match GenreGroupsManager::load().await {
        Ok(groups) => groups,
        Err(_) => {
            error!("No saved analysis found. Run genrecli analyze <playlist> first.");
        }
    };

    let mut selected_labels: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut uris: Vec<String> = Vec::new();

    for genre in &genres {
        // accept case-insensitive labels, fall back to the raw key
        let label = MacroGenre::from_label(genre)
            .map(|g| g.label().to_string())
            .unwrap_or_else(|| genre.clone());

        match groups.get(&label) {
            Some(group) => {
                selected_labels.push(label);
                for uri in group {
                    if seen.insert(uri.clone()) {
                        uris.push(uri.clone());
                    }
                }
            }
            None => warning!(
                "No tracks for genre '{}' in the last analysis. Available: {}",
                genre,
                groups
                    .labels()
                    .iter()
                    .map(|l| l.as_str())
                    .collect::<Vec<&str>>()
                    .join(", ")
            ),
        }
    }

    if uris.is_empty() {
        error!("No tracks selected, nothing to create.");
    }

    let mut token_mgr = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => {
            error!(
                "Failed to load token. Please run genrecli auth\n Error: {}",
                e
            );
        }
    };

    let playlist_name = name.unwrap_or_else(|| {
        let mut joined = selected_labels.join(" + ");
        joined.truncate(100);
        joined
    });

    let created = match spotify::playlist::create(&mut token_mgr, playlist_name, public).await {
        Ok(resp) => resp,
        Err(e) => error!("Failed to create playlist: {}", e),
    };

    info!("Adding {} tracks to '{}'...", uris.len(), created.name);
    for chunk in uris.chunks(100) {
        if let Err(e) =
            spotify::playlist::add_tracks(&mut token_mgr, &created.id, chunk.to_vec()).await
        {
            warning!("Failed to add tracks to playlist: {}", e);
        }
    }

    if let Some(cover_path) = cover {
        match async_fs::read(&cover_path).await {
            Ok(bytes) => {
                match spotify::playlist::upload_cover(&mut token_mgr, &created.id, &bytes).await {
                    Ok(_) => success!("Cover image uploaded."),
                    Err(e) => warning!("Failed to upload cover image: {}", e),
                }
            }
            Err(e) => warning!("Cannot read cover image {}: {}", cover_path.display(), e),
        }
    }

    success!(
        "Playlist created: https://open.spotify.com/playlist/{}",
        created.id
    );
}
