//! Per-reader favorite posts.
//!
//! Favorites are kept behind the [`FavoritesStore`] trait and handed to
//! whatever needs them. [`JsonFileFavorites`] persists the ids as a JSON
//! array in a local file, [`MemoryFavorites`] keeps them for the life of the
//! process only.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use spdlog::debug;

use crate::catalog::Catalog;
use crate::error::FavoritesError;
use crate::post::PostRecord;

pub trait FavoritesStore {
    fn is_favorite(&self, id: &str) -> bool;

    /// Adding an id twice keeps a single entry.
    fn add(&mut self, id: &str) -> Result<(), FavoritesError>;

    /// Removing an id that is not there does nothing.
    fn remove(&mut self, id: &str) -> Result<(), FavoritesError>;

    /// Ids in the order they were added.
    fn list(&self) -> Vec<String>;
}

#[derive(Debug, Default)]
pub struct MemoryFavorites {
    ids: Vec<String>,
}

impl MemoryFavorites {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FavoritesStore for MemoryFavorites {
    fn is_favorite(&self, id: &str) -> bool {
        self.ids.iter().any(|fav| fav == id)
    }

    fn add(&mut self, id: &str) -> Result<(), FavoritesError> {
        if !self.is_favorite(id) {
            self.ids.push(id.to_string());
        }
        Ok(())
    }

    fn remove(&mut self, id: &str) -> Result<(), FavoritesError> {
        self.ids.retain(|fav| fav != id);
        Ok(())
    }

    fn list(&self) -> Vec<String> {
        self.ids.clone()
    }
}

pub struct JsonFileFavorites {
    file: PathBuf,
    ids: MemoryFavorites,
}

impl JsonFileFavorites {
    /// A missing file is an empty list; it is created on the first change.
    pub fn open(file: &Path) -> Result<Self, FavoritesError> {
        let ids: Vec<String> = match fs::read_to_string(file) {
            Ok(content) => serde_json::from_str(&content).map_err(|source| FavoritesError::Corrupt {
                file: file.to_path_buf(),
                source,
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => vec![],
            Err(source) => return Err(FavoritesError::Io { file: file.to_path_buf(), source }),
        };

        let mut store = MemoryFavorites::new();
        for id in ids.iter() {
            store.add(id)?;
        }

        Ok(JsonFileFavorites {
            file: file.to_path_buf(),
            ids: store,
        })
    }

    fn save(&self) -> Result<(), FavoritesError> {
        let io_error = |source| FavoritesError::Io { file: self.file.clone(), source };
        if let Some(parent) = self.file.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_error)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.ids.list()).map_err(|source| FavoritesError::Corrupt {
            file: self.file.clone(),
            source,
        })?;
        fs::write(&self.file, json).map_err(io_error)?;
        debug!("Favorites saved to {}", self.file.display());
        Ok(())
    }
}

impl FavoritesStore for JsonFileFavorites {
    fn is_favorite(&self, id: &str) -> bool {
        self.ids.is_favorite(id)
    }

    fn add(&mut self, id: &str) -> Result<(), FavoritesError> {
        if self.ids.is_favorite(id) {
            return Ok(());
        }
        self.ids.add(id)?;
        self.save()
    }

    fn remove(&mut self, id: &str) -> Result<(), FavoritesError> {
        if !self.ids.is_favorite(id) {
            return Ok(());
        }
        self.ids.remove(id)?;
        self.save()
    }

    fn list(&self) -> Vec<String> {
        self.ids.list()
    }
}

/// Favorite posts still present in the catalog, in catalog order.
pub fn favorite_posts<'a>(catalog: &'a Catalog, store: &dyn FavoritesStore) -> Vec<&'a PostRecord> {
    catalog.posts().iter().filter(|post| store.is_favorite(&post.id)).collect()
}

#[cfg(test)]
mod tests {
    use crate::test_data::sample_post;

    use super::*;

    fn temp_file(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("folio-test-{}", std::process::id()));
        let file = dir.join(name);
        let _ = fs::remove_file(&file);
        file
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryFavorites::new();
        store.add("b").unwrap();
        store.add("a").unwrap();
        store.add("b").unwrap();
        assert_eq!(store.list(), ["b", "a"]);
        assert!(store.is_favorite("a"));

        store.remove("b").unwrap();
        store.remove("not-there").unwrap();
        assert_eq!(store.list(), ["a"]);
        assert!(!store.is_favorite("b"));
    }

    #[test]
    fn test_json_file_round_trip() {
        let file = temp_file("favorites.json");

        let mut store = JsonFileFavorites::open(&file).unwrap();
        assert!(store.list().is_empty());
        store.add("react-tips").unwrap();
        store.add("intro-to-web3").unwrap();
        store.add("react-tips").unwrap();

        let mut reopened = JsonFileFavorites::open(&file).unwrap();
        assert_eq!(reopened.list(), ["react-tips", "intro-to-web3"]);

        reopened.remove("react-tips").unwrap();
        let reopened = JsonFileFavorites::open(&file).unwrap();
        assert_eq!(reopened.list(), ["intro-to-web3"]);

        let _ = fs::remove_file(&file);
    }

    #[test]
    fn test_corrupt_file() {
        let file = temp_file("corrupt.json");
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(&file, "{not json").unwrap();

        let err = JsonFileFavorites::open(&file).err().unwrap();
        assert!(matches!(err, FavoritesError::Corrupt { .. }));

        let _ = fs::remove_file(&file);
    }

    #[test]
    fn test_favorite_posts_in_catalog_order() {
        let catalog = Catalog::from_posts(vec![
            sample_post("old", "2023-01-01", &[]),
            sample_post("new", "2024-01-01", &[]),
            sample_post("mid", "2023-06-01", &[]),
        ])
        .unwrap();

        let mut store = MemoryFavorites::new();
        store.add("old").unwrap();
        store.add("deleted-post").unwrap();
        store.add("new").unwrap();

        let ids: Vec<_> = favorite_posts(&catalog, &store).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["new", "old"]);
    }
}
