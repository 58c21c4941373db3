use std::{collections::HashMap, path::PathBuf};

use super::CacheError;

/// On-disk memoization of artist id -> genre tag list.
///
/// Persisted as a flat JSON object at `genrecli/cache/artist-genres.json`.
/// Once an artist has been looked up its entry is never absent again: an
/// empty remote answer is stored as the `["Unknown"]` sentinel so a miss is
/// never re-attempted. Entries are written back after every insertion so an
/// interrupted scan keeps the lookups it already paid for.
pub struct GenreCacheManager {
    entries: HashMap<String, Vec<String>>,
}

impl GenreCacheManager {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub async fn load() -> Result<Self, CacheError> {
        let path = Self::cache_path();
        let content = async_fs::read_to_string(&path).await?;
        let entries: HashMap<String, Vec<String>> = serde_json::from_str(&content)?;
        Ok(Self { entries })
    }

    pub async fn persist(&self) -> Result<(), CacheError> {
        let path = Self::cache_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.entries)?;
        async_fs::write(&path, json).await?;
        Ok(())
    }

    pub fn get(&self, artist_id: &str) -> Option<&Vec<String>> {
        self.entries.get(artist_id)
    }

    pub fn insert(&mut self, artist_id: String, genres: Vec<String>) {
        self.entries.insert(artist_id, genres);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deletes the cache file. Idempotent.
    pub async fn clear() -> Result<(), CacheError> {
        match async_fs::remove_file(Self::cache_path()).await {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::IoError(e)),
        }
    }

    fn cache_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("genrecli/cache/artist-genres.json");
        path
    }
}

impl Default for GenreCacheManager {
    fn default() -> Self {
        Self::new()
    }
}
