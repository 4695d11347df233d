/// Storage access for chrome.storage.sync and its in-memory stand-in

use crate::backup::{Clock, save_backup};
use crate::snapshot::Snapshot;
use serde_json::{Map, Value};
use std::cell::RefCell;
use thiserror::Error;

pub const TOPICS_KEY: &str = "topics";
pub const LINKS_KEY: &str = "links";

/// Usage ratio at which the popup warns that sync storage is nearly full
const QUOTA_WARNING_PERCENT: f64 = 90.0;

#[derive(Debug, Error)]
pub enum StorageError {
    /// The host storage call rejected or failed
    #[error("Storage request failed: {0}")]
    Backend(String),

    #[error("Stored data has an unexpected shape: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A key-value storage area with the `chrome.storage` get/set contract.
///
/// Completions are awaited on the single UI thread, so implementations do
/// not need to be `Send`.
#[allow(async_fn_in_trait)]
pub trait StorageArea {
    /// Fetch the given keys; absent keys are simply missing from the result
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>, StorageError>;

    /// Fetch every entry in the area
    async fn get_all(&self) -> Result<Map<String, Value>, StorageError>;

    /// Write the given entries, replacing existing values for those keys
    async fn set(&self, items: Map<String, Value>) -> Result<(), StorageError>;
}

/// Storage area held in memory, used off-browser and in tests
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<Map<String, Value>>,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A storage area whose `set` always fails
    pub fn read_only(entries: Map<String, Value>) -> Self {
        MemoryStorage {
            entries: RefCell::new(entries),
            fail_writes: true,
        }
    }

    pub fn with_entries(entries: Map<String, Value>) -> Self {
        MemoryStorage {
            entries: RefCell::new(entries),
            fail_writes: false,
        }
    }

    pub fn entries(&self) -> Map<String, Value> {
        self.entries.borrow().clone()
    }
}

impl StorageArea for MemoryStorage {
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>, StorageError> {
        let entries = self.entries.borrow();
        Ok(keys
            .iter()
            .filter_map(|key| entries.get(*key).map(|value| (key.to_string(), value.clone())))
            .collect())
    }

    async fn get_all(&self) -> Result<Map<String, Value>, StorageError> {
        Ok(self.entries())
    }

    async fn set(&self, items: Map<String, Value>) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Backend("storage is read-only".to_string()));
        }
        self.entries.borrow_mut().extend(items);
        Ok(())
    }
}

/// Encode a snapshot as the `topics` / `links` storage entries
pub fn snapshot_entries(snapshot: &Snapshot) -> Result<Map<String, Value>, StorageError> {
    let mut items = Map::new();
    items.insert(TOPICS_KEY.to_string(), serde_json::to_value(&snapshot.topics)?);
    items.insert(LINKS_KEY.to_string(), serde_json::to_value(&snapshot.links)?);
    Ok(items)
}

/// Load the saved snapshot; missing keys load as empty
pub async fn load_snapshot<S: StorageArea>(store: &S) -> Result<Snapshot, StorageError> {
    let mut data = store.get(&[TOPICS_KEY, LINKS_KEY]).await?;

    let topics = match data.remove(TOPICS_KEY) {
        Some(value) if !value.is_null() => serde_json::from_value(value)?,
        _ => Vec::new(),
    };
    let links = match data.remove(LINKS_KEY) {
        Some(value) if !value.is_null() => serde_json::from_value(value)?,
        _ => Default::default(),
    };

    Ok(Snapshot { topics, links })
}

/// Persist the snapshot, then record a backup of it.
///
/// A failed snapshot write is returned to the caller. A failed backup is
/// only logged: the user-facing save already succeeded.
pub async fn save_snapshot<S: StorageArea, C: Clock>(
    store: &S,
    snapshot: &Snapshot,
    clock: &C,
) -> Result<(), StorageError> {
    store.set(snapshot_entries(snapshot)?).await?;

    if let Err(e) = save_backup(store, snapshot, clock).await {
        log::warn!("Backup after save failed: {}", e);
    }
    Ok(())
}

/// Warning text when sync storage usage reaches the warning threshold
pub fn quota_warning(bytes_in_use: f64, quota: f64) -> Option<String> {
    if quota <= 0.0 {
        return None;
    }
    let percent = (bytes_in_use * 100.0 / quota).floor();
    (percent >= QUOTA_WARNING_PERCENT).then(|| format!("Sync storage {}% full!", percent))
}
