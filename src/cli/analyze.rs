use std::{collections::BTreeMap, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    error,
    genres::{self, MacroGenre},
    info,
    management::{GenreCacheManager, GenreGroupsManager, TokenManager},
    spotify, success,
    types::{GenreSummaryRow, Track, TrackTableRow},
    utils, warning,
};

pub async fn analyze(
    playlist: String,
    max_tracks: Option<usize>,
    artist_filter: Option<String>,
    max_wait_secs: Option<u64>,
    spanish: bool,
) {
    let playlist_id = utils::playlist_id_from_url(&playlist);

    let mut token_mgr = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => {
            error!(
                "Failed to load token. Please run genrecli auth\n Error: {}",
                e
            );
        }
    };

    // the whole cache is loaded once per scan; entries persist per miss
    let mut cache = GenreCacheManager::load()
        .await
        .unwrap_or_else(|_| GenreCacheManager::new());

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching playlist tracks...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let tracks =
        match spotify::playlist::get_playlist_tracks(&mut token_mgr, &playlist_id, max_tracks)
            .await
        {
            Ok(tracks) => tracks,
            Err(e) => {
                pb.finish_and_clear();
                error!("Failed to fetch playlist tracks: {}", e);
            }
        };
    pb.finish_and_clear();

    if tracks.is_empty() {
        warning!("No tracks found in playlist {}.", playlist_id);
        return;
    }
    info!("Fetched {} tracks.", tracks.len());

    let filter = artist_filter.map(|f| f.to_lowercase());
    let max_wait = max_wait_secs.map(Duration::from_secs);

    let pb = ProgressBar::new(tracks.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{bar:40.blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut rows: Vec<TrackTableRow> = Vec::new();
    let mut samples: Vec<(MacroGenre, Option<u8>, u64)> = Vec::new();
    let mut groups = GenreGroupsManager::new();

    for track in &tracks {
        let Some(primary) = track.primary_artist() else {
            pb.inc(1);
            continue;
        };

        if let Some(filter) = &filter {
            if !primary.name.to_lowercase().contains(filter) {
                pb.inc(1);
                continue;
            }
        }

        // a rate-limit wait suspends the whole scan here, by design
        let genre_tags = match &primary.id {
            Some(id) => {
                match spotify::artists::resolve_genres(&mut token_mgr, &mut cache, id, max_wait)
                    .await
                {
                    Ok(tags) => tags,
                    Err(e) => {
                        pb.finish_and_clear();
                        error!("Scan aborted: {}", e);
                    }
                }
            }
            // local files carry no artist id
            None => Vec::new(),
        };

        let macro_genre = genres::classify(&genre_tags);
        rows.push(track_row(track, macro_genre, spanish));
        samples.push((macro_genre, track.popularity, track.duration_ms));
        groups.add(macro_genre.label(), track.uri.clone());

        pb.set_message(primary.name.clone());
        pb.inc(1);
    }
    pb.finish_and_clear();

    if rows.is_empty() {
        warning!("No tracks survived the artist filter.");
        return;
    }

    println!("{}\n", Table::new(rows));
    println!("{}", Table::new(summarize(&samples, spanish)));

    match groups.persist().await {
        Ok(_) => success!(
            "Genre groups saved. Build a playlist with: genrecli playlist --genre <GENRE>"
        ),
        Err(e) => warning!("Cannot save genre groups: {}", e),
    }
}

fn track_row(track: &Track, macro_genre: MacroGenre, spanish: bool) -> TrackTableRow {
    TrackTableRow {
        name: track.name.clone(),
        artists: track
            .artists
            .iter()
            .map(|a| a.name.clone())
            .collect::<Vec<String>>()
            .join(", "),
        popularity: track
            .popularity
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string()),
        duration: utils::format_duration_ms(track.duration_ms),
        genre: if spanish {
            macro_genre.label_es().to_string()
        } else {
            macro_genre.label().to_string()
        },
    }
}

/// Aggregates per-genre track count, mean popularity and mean duration,
/// ordered by track count descending.
fn summarize(samples: &[(MacroGenre, Option<u8>, u64)], spanish: bool) -> Vec<GenreSummaryRow> {
    let mut per_genre: BTreeMap<MacroGenre, Vec<(Option<u8>, u64)>> = BTreeMap::new();
    for (genre, popularity, duration_ms) in samples {
        per_genre
            .entry(*genre)
            .or_default()
            .push((*popularity, *duration_ms));
    }

    let mut rows: Vec<GenreSummaryRow> = per_genre
        .into_iter()
        .map(|(genre, tracks)| {
            let popularity: Vec<f64> = tracks
                .iter()
                .filter_map(|(p, _)| p.map(|p| p as f64))
                .collect();
            let durations: Vec<f64> = tracks.iter().map(|(_, d)| *d as f64).collect();

            GenreSummaryRow {
                genre: if spanish {
                    genre.label_es().to_string()
                } else {
                    genre.label().to_string()
                },
                tracks: tracks.len(),
                mean_popularity: utils::mean(&popularity)
                    .map(|m| format!("{:.1}", m))
                    .unwrap_or_else(|| "-".to_string()),
                mean_duration: utils::mean(&durations)
                    .map(|m| utils::format_duration_ms(m as u64))
                    .unwrap_or_else(|| "-".to_string()),
            }
        })
        .collect();

    rows.sort_by(|a, b| b.tracks.cmp(&a.tracks));
    rows
}
