//! Identifying a plant photo from disk.

use crate::ai::{identify_with, DataUri, PlantProvider};
use crate::errors::AppResult;
use crate::journal::{JournalEntry, PlantAnalysis};
use crate::store::{JournalStore, KeyValueStorage};
use std::path::Path;
use tracing::{debug, info};

/// Result of identifying a photo.
#[derive(Debug)]
pub struct Identified {
    pub analysis: PlantAnalysis,
    /// The stored entry, when saving was requested.
    pub entry: Option<JournalEntry>,
}

/// Reads `path`, identifies the plant in it, and optionally saves an entry.
///
/// # Flow
///
/// 1. Read the file and encode it as a data URI (mime type from the extension)
/// 2. Identify through `provider`; "Unknown" answers become `NotAPlant`
/// 3. If `save`, store a new entry with the photo embedded
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read or has an unsupported extension
/// - The backend fails or finds no plant
/// - Saving was requested and the journal could not be written
pub fn identify_photo<S: KeyValueStorage>(
    store: &JournalStore<S>,
    provider: &dyn PlantProvider,
    path: &Path,
    save: bool,
) -> AppResult<Identified> {
    let image = DataUri::from_path(path)?;
    debug!("Read {} image from {}", image.mime_type(), path.display());

    identify_image(store, provider, &image, save)
}

/// Identifies an in-memory image and optionally saves an entry.
pub fn identify_image<S: KeyValueStorage>(
    store: &JournalStore<S>,
    provider: &dyn PlantProvider,
    image: &DataUri,
    save: bool,
) -> AppResult<Identified> {
    let analysis = identify_with(provider, image)?;

    let entry = if save {
        let entry = JournalEntry::new(analysis.clone(), image.to_string(), store.now());
        store.save_entry(entry.clone())?;
        info!("Saved {} as entry {}", entry.analysis.common_name, entry.id);
        Some(entry)
    } else {
        None
    };

    Ok(Identified { analysis, entry })
}
