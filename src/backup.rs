/// Timestamped backups and the one-time restore prompt

use crate::snapshot::Snapshot;
use crate::storage::{StorageArea, StorageError, load_snapshot, snapshot_entries};
use serde_json::{Map, Value};

/// Prefix of every backup key; the rest of the key is an ISO-8601 timestamp,
/// so lexicographic key order is chronological order.
pub const BACKUP_PREFIX: &str = "backup_";

/// Set once the user has answered the restore prompt. Never cleared.
pub const RESTORE_FLAG_KEY: &str = "backup_restored";

pub const RESTORE_PROMPT: &str = "Backup data found. Do you want to restore previous saved data?";

/// Source of the wall-clock timestamps used in backup keys
pub trait Clock {
    /// Current time as ISO-8601 with millisecond precision
    fn now_iso(&self) -> String;
}

/// What happened to the restore prompt while opening the popup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// The flag was already set; no prompt shown
    AlreadyHandled,
    NoBackup,
    /// The user accepted; the named backup now is the saved state
    Restored(String),
    Declined,
    /// The answer could not be written; nothing was restored and the
    /// prompt will be shown again next time
    Unsaved,
}

pub fn backup_key(timestamp: &str) -> String {
    format!("{}{}", BACKUP_PREFIX, timestamp)
}

fn is_backup_key(key: &str) -> bool {
    key.starts_with(BACKUP_PREFIX) && key != RESTORE_FLAG_KEY
}

/// Find the most recent backup among all stored entries.
///
/// Entries that do not decode as a snapshot are skipped in favor of the
/// next most recent one.
pub fn latest_backup(entries: &Map<String, Value>) -> Option<(String, Snapshot)> {
    let mut keys: Vec<&String> = entries.keys().filter(|key| is_backup_key(key)).collect();
    keys.sort_unstable_by(|a, b| b.cmp(a));

    keys.into_iter().find_map(|key| {
        match serde_json::from_value::<Snapshot>(entries[key].clone()) {
            Ok(snapshot) => Some((key.clone(), snapshot)),
            Err(e) => {
                log::warn!("Skipping unreadable backup {}: {}", key, e);
                None
            }
        }
    })
}

/// Write an immutable copy of `snapshot` under a fresh timestamped key
pub async fn save_backup<S: StorageArea, C: Clock>(
    store: &S,
    snapshot: &Snapshot,
    clock: &C,
) -> Result<String, StorageError> {
    let key = backup_key(&clock.now_iso());
    let mut items = Map::new();
    items.insert(key.clone(), serde_json::to_value(snapshot)?);
    store.set(items).await?;
    Ok(key)
}

/// Offer to restore the latest backup, at most once per storage area.
///
/// `confirm` is asked only when the flag is unset and a backup exists.
/// Answering either way sets the flag; with no backup the flag stays unset.
pub async fn offer_restore<S, F>(store: &S, confirm: F) -> Result<RestoreOutcome, StorageError>
where
    S: StorageArea,
    F: FnOnce(&Snapshot) -> bool,
{
    let flags = store.get(&[RESTORE_FLAG_KEY]).await?;
    if flags.get(RESTORE_FLAG_KEY).and_then(Value::as_bool).unwrap_or(false) {
        return Ok(RestoreOutcome::AlreadyHandled);
    }

    let all = store.get_all().await?;
    let Some((key, backup)) = latest_backup(&all) else {
        return Ok(RestoreOutcome::NoBackup);
    };

    let accepted = confirm(&backup);
    let mut items = if accepted {
        snapshot_entries(&backup)?
    } else {
        Map::new()
    };
    items.insert(RESTORE_FLAG_KEY.to_string(), Value::Bool(true));
    // Startup must still load the current data when storage rejects writes
    if let Err(e) = store.set(items).await {
        log::warn!("Could not record restore answer for {}: {}", key, e);
        return Ok(RestoreOutcome::Unsaved);
    }

    if accepted {
        log::info!("Restored data from {}", key);
        Ok(RestoreOutcome::Restored(key))
    } else {
        log::info!("Restore of {} declined", key);
        Ok(RestoreOutcome::Declined)
    }
}

/// Popup startup: run the restore prompt if due, then load the saved state
pub async fn initialize<S, F>(store: &S, confirm: F) -> Result<Snapshot, StorageError>
where
    S: StorageArea,
    F: FnOnce(&Snapshot) -> bool,
{
    let outcome = offer_restore(store, confirm).await?;
    log::debug!("Restore check: {:?}", outcome);
    load_snapshot(store).await
}
