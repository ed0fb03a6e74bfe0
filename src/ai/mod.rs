//! AI operations for plant identification and image generation.
//!
//! This module hides two differently shaped third-party APIs behind one
//! contract: `identify(image) -> PlantAnalysis` and
//! `generate(description) -> image`. The backend is chosen per call from the
//! credentials present in the environment.
//!
//! # Module Structure
//!
//! - `provider`: backend selection, the `PlantProvider` trait, shared checks
//! - `gemini`: structured-output client (primary)
//! - `openai`: prompt-instructed client (used when its key is set)
//! - `prompts`: identification instruction, response schema, style suffix
//! - `data_uri`: inline image representation
//!
//! # Example
//!
//! ```no_run
//! use sprout::ai::{EnvCredentials, PlantAi};
//! use sprout::config::AiConfig;
//!
//! let ai = PlantAi::new(AiConfig::load(), EnvCredentials);
//! let image = ai.generate("a flowering jade plant on a windowsill")?;
//! assert!(image.to_string().starts_with("data:"));
//! # Ok::<(), sprout::AppError>(())
//! ```

pub mod data_uri;
pub mod gemini;
pub mod openai;
pub mod prompts;
pub mod provider;

// Re-export commonly used types
pub use data_uri::DataUri;
pub use provider::{
    generate_with, identify_with, select_backend, Backend, CredentialSource, Credentials,
    EnvCredentials, PlantAi, PlantProvider,
};
