//! Configuration management for the sprout application.
//!
//! This module handles loading and validating configuration settings from environment
//! variables, with sensible defaults.
//!
//! # Environment Variables
//!
//! - `SPROUT_DIR`: Path to the data directory (defaults to ~/.local/share/sprout)
//! - `SPROUT_LANGUAGE`: Language for analysis text (defaults to English)
//! - `SPROUT_GEMINI_BASE_URL`, `SPROUT_GEMINI_MODEL`, `SPROUT_GEMINI_IMAGE_MODEL`
//! - `SPROUT_OPENAI_BASE_URL`, `SPROUT_OPENAI_MODEL`, `SPROUT_OPENAI_IMAGE_MODEL`
//! - `HOME`: Used for expanding the default data directory path
//!
//! API keys (`GEMINI_API_KEY`, `OPENAI_API_KEY`) are not part of this
//! configuration. They are read on every AI call; see `ai::EnvCredentials`.

use crate::constants::{
    DEFAULT_DATA_SUBDIR, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_IMAGE_MODEL,
    DEFAULT_GEMINI_MODEL, DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_IMAGE_MODEL,
    DEFAULT_OPENAI_MODEL, DEFAULT_TARGET_LANGUAGE, ENV_VAR_GEMINI_BASE_URL,
    ENV_VAR_GEMINI_IMAGE_MODEL, ENV_VAR_GEMINI_MODEL, ENV_VAR_HOME, ENV_VAR_OPENAI_BASE_URL,
    ENV_VAR_OPENAI_IMAGE_MODEL, ENV_VAR_OPENAI_MODEL, ENV_VAR_SPROUT_DIR,
    ENV_VAR_SPROUT_LANGUAGE, REDACTED_PLACEHOLDER,
};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Endpoints, models, and language used by the AI backends.
///
/// # Examples
///
/// ```
/// use sprout::config::AiConfig;
///
/// let config = AiConfig::default();
/// assert_eq!(config.language, "English");
/// assert!(config.gemini_base_url.starts_with("https://"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiConfig {
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub gemini_image_model: String,
    pub openai_base_url: String,
    pub openai_model: String,
    pub openai_image_model: String,
    /// Language every text field of an analysis is translated into.
    pub language: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        AiConfig {
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_image_model: DEFAULT_GEMINI_IMAGE_MODEL.to_string(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            openai_image_model: DEFAULT_OPENAI_IMAGE_MODEL.to_string(),
            language: DEFAULT_TARGET_LANGUAGE.to_string(),
        }
    }
}

impl AiConfig {
    /// Loads overrides from the environment on top of the defaults.
    pub fn load() -> Self {
        let defaults = AiConfig::default();
        let var_or = |name: &str, default: String| {
            env::var(name)
                .ok()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or(default)
        };

        AiConfig {
            gemini_base_url: trim_base_url(var_or(
                ENV_VAR_GEMINI_BASE_URL,
                defaults.gemini_base_url,
            )),
            gemini_model: var_or(ENV_VAR_GEMINI_MODEL, defaults.gemini_model),
            gemini_image_model: var_or(ENV_VAR_GEMINI_IMAGE_MODEL, defaults.gemini_image_model),
            openai_base_url: trim_base_url(var_or(
                ENV_VAR_OPENAI_BASE_URL,
                defaults.openai_base_url,
            )),
            openai_model: var_or(ENV_VAR_OPENAI_MODEL, defaults.openai_model),
            openai_image_model: var_or(ENV_VAR_OPENAI_IMAGE_MODEL, defaults.openai_image_model),
            language: var_or(ENV_VAR_SPROUT_LANGUAGE, defaults.language),
        }
    }
}

fn trim_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

/// Configuration for the sprout application.
///
/// # Examples
///
/// Creating a configuration manually:
/// ```
/// use sprout::config::{AiConfig, Config};
/// use std::path::PathBuf;
///
/// let config = Config {
///     data_dir: PathBuf::from("/path/to/sprout"),
///     ai: AiConfig::default(),
/// };
/// assert!(config.validate().is_ok());
/// ```
pub struct Config {
    /// Directory holding the journal storage file.
    ///
    /// This is loaded from the SPROUT_DIR environment variable with a fallback
    /// to ~/.local/share/sprout if not specified.
    pub data_dir: PathBuf,

    /// AI backend settings.
    pub ai: AiConfig,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("data_dir", &REDACTED_PLACEHOLDER)
            .field("ai", &self.ai)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from(""),
            ai: AiConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// The data directory is expanded using `shellexpand` to handle `~` and
    /// environment variable references.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - The data directory path expansion fails
    /// - The resulting path is empty
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use sprout::Config;
    ///
    /// match Config::load() {
    ///     Ok(config) => println!("Loaded config: {:?}", config),
    ///     Err(err) => eprintln!("Failed to load config: {}", err),
    /// }
    /// ```
    pub fn load() -> AppResult<Self> {
        let data_dir_str = env::var(ENV_VAR_SPROUT_DIR).unwrap_or_else(|_| {
            let home = env::var(ENV_VAR_HOME).unwrap_or_else(|_| "".to_string());
            format!("{}/{}", home, DEFAULT_DATA_SUBDIR)
        });

        // Expand the path (handles ~ and environment variables)
        let expanded_path = shellexpand::full(&data_dir_str)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;

        let data_dir = PathBuf::from(expanded_path.into_owned());

        if data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        Ok(Config {
            data_dir,
            ai: AiConfig::load(),
        })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` with one of the following messages:
    /// - "Data directory path is empty"
    /// - "Data directory must be an absolute path"
    /// - "Target language is empty"
    pub fn validate(&self) -> AppResult<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        if !self.data_dir.is_absolute() {
            return Err(AppError::Config(
                "Data directory must be an absolute path".to_string(),
            ));
        }

        if self.ai.language.trim().is_empty() {
            return Err(AppError::Config("Target language is empty".to_string()));
        }

        Ok(())
    }
}
