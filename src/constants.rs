//! Constants used throughout the application.
//!
//! This module contains all constants used in the Sprout application, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "sprout";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "A personal plant journal with AI species identification";

// CLI Arguments & Defaults
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Configuration Keys & Environment Variables
/// Environment variable for specifying the journal data directory.
pub const ENV_VAR_SPROUT_DIR: &str = "SPROUT_DIR";
/// Environment variable for the language analysis text is translated into.
pub const ENV_VAR_SPROUT_LANGUAGE: &str = "SPROUT_LANGUAGE";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default sub-directory for journal data within the user's home directory.
pub const DEFAULT_DATA_SUBDIR: &str = ".local/share/sprout";
/// Default target language for analysis text.
pub const DEFAULT_TARGET_LANGUAGE: &str = "English";

/// Primary credential. Selects the Gemini backend when the secondary one is absent.
pub const ENV_VAR_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
/// Secondary credential. Its presence selects the OpenAI backend.
pub const ENV_VAR_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_VAR_GEMINI_BASE_URL: &str = "SPROUT_GEMINI_BASE_URL";
pub const ENV_VAR_GEMINI_MODEL: &str = "SPROUT_GEMINI_MODEL";
pub const ENV_VAR_GEMINI_IMAGE_MODEL: &str = "SPROUT_GEMINI_IMAGE_MODEL";
pub const ENV_VAR_OPENAI_BASE_URL: &str = "SPROUT_OPENAI_BASE_URL";
pub const ENV_VAR_OPENAI_MODEL: &str = "SPROUT_OPENAI_MODEL";
pub const ENV_VAR_OPENAI_IMAGE_MODEL: &str = "SPROUT_OPENAI_IMAGE_MODEL";

// AI Backends
/// Public endpoint of the Gemini API.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Gemini model used for identification.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
/// Gemini model used for image generation.
pub const DEFAULT_GEMINI_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
/// Public endpoint of the OpenAI API.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
/// OpenAI model used for identification.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
/// OpenAI model used for image generation.
pub const DEFAULT_OPENAI_IMAGE_MODEL: &str = "dall-e-3";
/// Square size requested from the image generation endpoint.
pub const GENERATED_IMAGE_SIZE: &str = "1024x1024";
/// Mime type of images returned by the OpenAI image endpoint.
pub const OPENAI_IMAGE_MIME: &str = "image/png";

/// Value a backend reports for both names when no plant is recognized.
pub const NOT_A_PLANT_SENTINEL: &str = "Unknown";
/// Suffix appended to every image generation prompt.
pub const IMAGE_STYLE_SUFFIX: &str =
    "photorealistic, high-quality, botanical-photography style, isolated subject";
/// Number of fun facts requested from the identification backend.
pub const FUN_FACT_COUNT: usize = 2;

// Storage
/// Key under which the whole journal collection is persisted.
pub const JOURNAL_STORAGE_KEY: &str = "plant-journal-entries";
/// File extension for persisted storage keys.
pub const STORAGE_FILE_EXTENSION: &str = "json";
/// Default POSIX permissions for newly created directories (owner read/write/execute).
#[cfg(unix)]
pub const DEFAULT_DIR_PERMISSIONS: u32 = 0o700;
/// Default POSIX permissions for newly created files (owner read/write).
#[cfg(unix)]
pub const DEFAULT_FILE_PERMISSIONS: u32 = 0o600;

// Validation
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "sprout";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";
