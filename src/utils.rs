use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Extracts the playlist id from a share URL, or passes a bare id through.
///
/// Accepts `https://open.spotify.com/playlist/<id>?si=...` as well as a raw
/// playlist id.
pub fn playlist_id_from_url(url: &str) -> String {
    match url.split_once("playlist/") {
        Some((_, rest)) => rest
            .split(['?', '/'])
            .next()
            .unwrap_or(rest)
            .to_string(),
        None => url.trim().to_string(),
    }
}

/// Formats a track duration in milliseconds as `m:ss`.
pub fn format_duration_ms(duration_ms: u64) -> String {
    let total_secs = duration_ms / 1000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

/// Mean of a list of values, None for empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
