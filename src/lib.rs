/*!
# Sprout

Sprout is a plant journal: photograph a plant, have an AI backend identify it
and describe how to care for it, and keep the result as a journal entry you
can favorite and annotate. It can also synthesize photorealistic plant images
from a text description.

## Core Features

- Identify plants from a photo (common and scientific name, care, toxicity)
- Generate plant images from a description
- Keep a local journal with favorites and dated notes
- Pick the AI backend per call from the credentials in the environment

## Architecture

- `ai`: provider abstraction over two AI backends, data URIs, prompts
- `store`: whole-journal JSON persistence under a single key
- `journal`: entry, note, and analysis types
- `ops`: one operation per CLI command
- `cli`: command-line interface handling using clap
- `config`: configuration loading and validation
- `errors`: error handling infrastructure

## Usage Example

```rust,no_run
use sprout::ai::{EnvCredentials, PlantAi};
use sprout::store::JournalStore;
use sprout::{ops, Config};
use std::path::Path;

fn main() -> sprout::AppResult<()> {
    let config = Config::load()?;
    config.validate()?;

    let store = JournalStore::open(&config.data_dir);
    let ai = PlantAi::new(config.ai.clone(), EnvCredentials);

    let provider = ai.provider()?;
    let identified = ops::identify_photo(&store, provider.as_ref(), Path::new("fern.jpg"), true)?;
    println!("{}", identified.analysis.common_name);
    Ok(())
}
```
*/

/// AI backends for identification and image generation
pub mod ai;
/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Application-wide constants
pub mod constants;
/// Error types and utilities for error handling
pub mod errors;
/// Journal data model
pub mod journal;
/// High-level operations
pub mod ops;
/// Journal persistence
pub mod store;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use journal::{JournalEntry, Note, PlantAnalysis};
