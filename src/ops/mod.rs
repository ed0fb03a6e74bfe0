//! High-level operations behind each CLI command.
//!
//! Each operation takes the journal store and, where AI is involved, an
//! already-resolved `PlantProvider`, so everything here runs without the
//! binary or a network.

pub mod entries;
pub mod generate;
pub mod identify;

// Re-export commonly used functions
pub use entries::{add_note, delete_entry, list_entries, show_entry, toggle_favorite};
pub use generate::{generate_plant, write_image, GenerateOptions, Generated};
pub use identify::{identify_image, identify_photo, Identified};
