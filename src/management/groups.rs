use std::{collections::BTreeMap, path::PathBuf};

use super::CacheError;

/// Result of the last playlist scan: macro-genre label -> track URIs.
///
/// `analyze` writes this file so a later `playlist` invocation can build a
/// playlist from selected buckets without re-scanning. A BTreeMap keeps the
/// genre listing stable across runs.
pub struct GenreGroupsManager {
    groups: BTreeMap<String, Vec<String>>,
}

impl GenreGroupsManager {
    pub fn new() -> Self {
        Self {
            groups: BTreeMap::new(),
        }
    }

    pub async fn load() -> Result<Self, CacheError> {
        let path = Self::groups_path();
        let content = async_fs::read_to_string(&path).await?;
        let groups: BTreeMap<String, Vec<String>> = serde_json::from_str(&content)?;
        Ok(Self { groups })
    }

    pub async fn persist(&self) -> Result<(), CacheError> {
        let path = Self::groups_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.groups)?;
        async_fs::write(&path, json).await?;
        Ok(())
    }

    pub fn add(&mut self, genre_label: &str, uri: String) {
        self.groups
            .entry(genre_label.to_string())
            .or_default()
            .push(uri);
    }

    pub fn get(&self, genre_label: &str) -> Option<&Vec<String>> {
        self.groups.get(genre_label)
    }

    pub fn labels(&self) -> Vec<&String> {
        self.groups.keys().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Deletes the groups file. Idempotent.
    pub async fn clear() -> Result<(), CacheError> {
        match async_fs::remove_file(Self::groups_path()).await {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::IoError(e)),
        }
    }

    fn groups_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("genrecli/cache/genre-groups.json");
        path
    }
}

impl Default for GenreGroupsManager {
    fn default() -> Self {
        Self::new()
    }
}
