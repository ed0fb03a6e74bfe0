//! Generating plant photos from a description.

use super::identify::identify_image;
use crate::ai::{generate_with, DataUri, PlantProvider};
use crate::errors::AppResult;
use crate::journal::{JournalEntry, PlantAnalysis};
use crate::store::{JournalStore, KeyValueStorage};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// What to do with a generated image besides returning it.
#[derive(Debug, Default, Clone)]
pub struct GenerateOptions {
    /// Write the decoded image here.
    pub out: Option<PathBuf>,
    /// Run identification on the generated image.
    pub identify: bool,
    /// Save the generated image as a journal entry. Implies `identify`.
    pub save: bool,
}

/// Result of generating an image.
#[derive(Debug)]
pub struct Generated {
    pub image: DataUri,
    pub written_to: Option<PathBuf>,
    pub analysis: Option<PlantAnalysis>,
    pub entry: Option<JournalEntry>,
}

/// Generates a photo of `description` and handles the requested follow-ups.
///
/// Identification of the generated image runs on the same backend that
/// produced it.
///
/// # Errors
///
/// Returns an error if:
/// - The description is blank
/// - The backend fails or returns no image
/// - The output file cannot be written
/// - Identification finds no plant in the generated image
/// - Saving was requested and the journal could not be written
pub fn generate_plant<S: KeyValueStorage>(
    store: &JournalStore<S>,
    provider: &dyn PlantProvider,
    description: &str,
    options: &GenerateOptions,
) -> AppResult<Generated> {
    let image = generate_with(provider, description)?;

    let written_to = match &options.out {
        Some(path) => Some(write_image(&image, path)?),
        None => None,
    };

    let (analysis, entry) = if options.identify || options.save {
        let identified = identify_image(store, provider, &image, options.save)?;
        (Some(identified.analysis), identified.entry)
    } else {
        (None, None)
    };

    Ok(Generated {
        image,
        written_to,
        analysis,
        entry,
    })
}

/// Decodes `image` into `path`. A path without an extension gets one from
/// the image's mime type. Returns the path actually written.
pub fn write_image(image: &DataUri, path: &Path) -> AppResult<PathBuf> {
    let path = if path.extension().is_none() {
        path.with_extension(image.file_extension())
    } else {
        path.to_path_buf()
    };

    let bytes = image.decode()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, &bytes)?;

    info!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(path)
}
