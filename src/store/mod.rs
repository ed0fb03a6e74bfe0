//! Local persistence for the plant journal.
//!
//! The whole journal is one JSON array of `JournalEntry` under a single
//! storage key. Every mutation reads the array, changes it, and writes the
//! whole array back. Entries are kept most recently saved first, and each
//! entry's notes newest first.
//!
//! Reads never fail: missing, unreadable, or corrupted storage is logged and
//! treated as an empty journal. Writes fail synchronously and are not retried.
//!
//! There is no locking. Two processes mutating the journal at once will
//! race, and the last whole-array write wins.

pub mod storage;

use crate::constants::JOURNAL_STORAGE_KEY;
use crate::errors::{AppResult, StoreError};
use crate::journal::{JournalEntry, Note};
use chrono::{DateTime, Utc};
use std::path::Path;
use tracing::{debug, info, warn};

pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// CRUD over the journal collection.
///
/// # Examples
///
/// ```
/// use sprout::store::{JournalStore, MemoryStorage};
///
/// let store = JournalStore::new(MemoryStorage::new());
/// assert!(store.list_entries().is_empty());
/// assert!(store.toggle_favorite("missing").unwrap().is_none());
/// ```
pub struct JournalStore<S: KeyValueStorage> {
    storage: S,
    clock: Clock,
}

impl JournalStore<FileStorage> {
    /// Opens the journal kept in `data_dir`. Nothing is created until the first write.
    pub fn open(data_dir: &Path) -> Self {
        Self::new(FileStorage::new(data_dir))
    }
}

impl<S: KeyValueStorage> JournalStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            clock: Box::new(Utc::now),
        }
    }

    /// Replaces the timestamp source used for new notes and `now()`.
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Current time according to the store's clock.
    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// All entries, most recently saved first.
    ///
    /// Returns an empty list if storage is absent, unreadable, or corrupted.
    pub fn list_entries(&self) -> Vec<JournalEntry> {
        let raw = match self.storage.read(JOURNAL_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No journal stored yet");
                return Vec::new();
            }
            Err(e) => {
                warn!("Failed to read journal, treating as empty: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<JournalEntry>>(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Stored journal is corrupted, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Finds an entry by id. With duplicate ids, the most recent one wins.
    pub fn get_entry(&self, id: &str) -> Option<JournalEntry> {
        self.list_entries().into_iter().find(|entry| entry.id == id)
    }

    /// Puts `entry` at the front of the journal.
    ///
    /// Saving the same id twice stores two entries.
    pub fn save_entry(&self, entry: JournalEntry) -> AppResult<()> {
        let mut entries = self.list_entries();
        let id = entry.id.clone();
        entries.insert(0, entry);
        self.persist(&entries)?;
        info!("Saved journal entry {}", id);
        Ok(())
    }

    /// Removes every entry with `id`. Unknown ids are ignored.
    pub fn delete_entry(&self, id: &str) -> AppResult<()> {
        let mut entries = self.list_entries();
        let before = entries.len();
        entries.retain(|entry| entry.id != id);

        if entries.len() == before {
            debug!("No journal entry {} to delete", id);
            return Ok(());
        }

        self.persist(&entries)?;
        info!("Deleted journal entry {}", id);
        Ok(())
    }

    /// Flips the favorite flag and returns the updated entry.
    ///
    /// `Ok(None)` means no entry has this id and nothing changed.
    pub fn toggle_favorite(&self, id: &str) -> AppResult<Option<JournalEntry>> {
        let mut entries = self.list_entries();
        let Some(entry) = entries.iter_mut().find(|entry| entry.id == id) else {
            debug!("No journal entry {} to favorite", id);
            return Ok(None);
        };

        entry.is_favorite = !entry.is_favorite;
        let updated = entry.clone();
        self.persist(&entries)?;

        info!(
            "Journal entry {} is {}a favorite",
            id,
            if updated.is_favorite { "now " } else { "no longer " }
        );
        Ok(Some(updated))
    }

    /// Prepends a note and returns the updated entry.
    ///
    /// Blank `text` is rejected here: nothing is written and the entry comes
    /// back unchanged. `Ok(None)` means no entry has this id.
    pub fn add_note(&self, id: &str, text: &str) -> AppResult<Option<JournalEntry>> {
        let mut entries = self.list_entries();
        let Some(entry) = entries.iter_mut().find(|entry| entry.id == id) else {
            debug!("No journal entry {} to annotate", id);
            return Ok(None);
        };

        let text = text.trim();
        if text.is_empty() {
            debug!("Ignoring empty note for journal entry {}", id);
            return Ok(Some(entry.clone()));
        }

        entry.notes.insert(0, Note::new(text, self.now()));
        let updated = entry.clone();
        self.persist(&entries)?;

        info!(
            "Added note to journal entry {} ({} notes)",
            id,
            updated.notes.len()
        );
        Ok(Some(updated))
    }

    fn persist(&self, entries: &[JournalEntry]) -> AppResult<()> {
        let encoded = serde_json::to_string(entries).map_err(StoreError::Serialize)?;
        self.storage
            .write(JOURNAL_STORAGE_KEY, &encoded)
            .map_err(|source| StoreError::Write {
                key: JOURNAL_STORAGE_KEY.to_string(),
                source,
            })?;
        Ok(())
    }
}
