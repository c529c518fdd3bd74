use std::path::Path;

use chrono::{DateTime, Utc};
use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::{FavoritesError, Result};
use super::keys::{FAVORITE_PREFIX, decode_favorite_key, encode_favorite_key};
use crate::items::Item;

/// One stored favorite
#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteRecord {
    pub id: String,
    pub item: Item,
    pub added_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize)]
struct StoredFavorite {
    item: Item,
    added_at: DateTime<Utc>,
}

/// Fjall-backed favorites list
#[derive(Clone)]
pub struct FavoriteList {
    keyspace: Keyspace,
    favorites: PartitionHandle,
}

impl FavoriteList {
    /// Open or create the favorites store at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening favorites store at: {}", path.display());

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let keyspace = Config::new(path).open()?;
        let favorites = keyspace.open_partition("favorites", PartitionCreateOptions::default())?;

        Ok(Self {
            keyspace,
            favorites,
        })
    }

    /// Store an item; re-adding the same item replaces its record
    pub fn add(&self, item: &Item) -> Result<()> {
        let id = item.id();
        let stored = StoredFavorite {
            item: item.clone(),
            added_at: Utc::now(),
        };
        self.favorites
            .insert(encode_favorite_key(&id), serde_json::to_vec(&stored)?)?;
        debug!(id, name = item.name(), "Added favorite");
        Ok(())
    }

    pub fn remove(&self, item: &Item) -> Result<bool> {
        self.remove_id(&item.id())
    }

    /// Returns whether a record was removed
    pub fn remove_id(&self, id: &str) -> Result<bool> {
        let key = encode_favorite_key(id);
        if !self.favorites.contains_key(&key)? {
            return Ok(false);
        }
        self.favorites.remove(key)?;
        debug!(id, "Removed favorite");
        Ok(true)
    }

    pub fn contains(&self, id: &str) -> Result<bool> {
        Ok(self.favorites.contains_key(encode_favorite_key(id))?)
    }

    /// All favorites ordered by name, ignoring case
    pub fn get_items(&self) -> Result<Vec<FavoriteRecord>> {
        let mut records = Vec::new();
        for entry in self.favorites.prefix(FAVORITE_PREFIX) {
            let (key, value) = entry?;
            let id = decode_favorite_key(&key)
                .ok_or_else(|| FavoritesError::InvalidKey(String::from_utf8_lossy(&key).into_owned()))?;
            let stored: StoredFavorite = serde_json::from_slice(&value)?;
            records.push(FavoriteRecord {
                id,
                item: stored.item,
                added_at: stored.added_at,
            });
        }

        records.sort_by_cached_key(|record| record.item.name().to_uppercase());
        Ok(records)
    }

    /// Remove every favorite, returning how many were dropped
    pub fn clear(&self) -> Result<usize> {
        let mut keys = Vec::new();
        for entry in self.favorites.prefix(FAVORITE_PREFIX) {
            let (key, _) = entry?;
            keys.push(key);
        }

        let removed = keys.len();
        for key in keys {
            self.favorites.remove(key)?;
        }
        info!(removed, "Cleared favorites");
        Ok(removed)
    }

    /// Persist all pending writes to disk
    pub fn persist(&self) -> Result<()> {
        self.keyspace.persist(fjall::PersistMode::SyncAll)?;
        Ok(())
    }
}
