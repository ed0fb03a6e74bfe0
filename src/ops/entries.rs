//! Browsing and editing saved journal entries.

use crate::errors::{AppError, AppResult};
use crate::journal::JournalEntry;
use crate::store::{JournalStore, KeyValueStorage};
use tracing::info;

/// Lists entries newest first, optionally only favorites.
pub fn list_entries<S: KeyValueStorage>(
    store: &JournalStore<S>,
    favorites_only: bool,
) -> Vec<JournalEntry> {
    let entries = store.list_entries();
    if !favorites_only {
        return entries;
    }
    entries.into_iter().filter(|e| e.is_favorite).collect()
}

/// Looks up a single entry.
///
/// # Errors
///
/// Returns `AppError::NotFound` if no entry has `id`.
pub fn show_entry<S: KeyValueStorage>(store: &JournalStore<S>, id: &str) -> AppResult<JournalEntry> {
    store
        .get_entry(id)
        .ok_or_else(|| AppError::NotFound(id.to_string()))
}

/// Flips the favorite flag on an entry and returns it.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown id, or a storage error if the
/// journal could not be written.
pub fn toggle_favorite<S: KeyValueStorage>(
    store: &JournalStore<S>,
    id: &str,
) -> AppResult<JournalEntry> {
    store
        .toggle_favorite(id)?
        .ok_or_else(|| AppError::NotFound(id.to_string()))
}

/// Adds a note to an entry and returns the updated entry.
///
/// # Errors
///
/// Returns `AppError::Input` for blank text, `AppError::NotFound` for an
/// unknown id, or a storage error if the journal could not be written.
pub fn add_note<S: KeyValueStorage>(
    store: &JournalStore<S>,
    id: &str,
    text: &str,
) -> AppResult<JournalEntry> {
    if text.trim().is_empty() {
        return Err(AppError::Input("Note text cannot be empty".to_string()));
    }

    store
        .add_note(id, text)?
        .ok_or_else(|| AppError::NotFound(id.to_string()))
}

/// Deletes an entry. Returns whether anything was removed.
pub fn delete_entry<S: KeyValueStorage>(store: &JournalStore<S>, id: &str) -> AppResult<bool> {
    let existed = store.get_entry(id).is_some();
    if !existed {
        info!("Nothing to delete for {}", id);
    }
    store.delete_entry(id)?;
    Ok(existed)
}
