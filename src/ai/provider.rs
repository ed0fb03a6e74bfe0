//! Backend selection and the uniform identify/generate contract.
//!
//! Two interchangeable backends implement `PlantProvider`. Which one is
//! active is decided per call from the credentials in effect at that moment:
//! if the secondary (OpenAI) credential is present it is used for everything,
//! otherwise the primary (Gemini) backend is used. Nothing is cached, so
//! fixing a misconfigured environment takes effect on the next call.
//!
//! Whatever backend answered, results pass through the same checks here:
//! identification results must not carry the "Unknown" sentinel, and
//! generated images come back as data URIs.

use super::data_uri::DataUri;
use super::gemini::GeminiClient;
use super::openai::OpenAiClient;
use crate::config::AiConfig;
use crate::constants::{
    ENV_VAR_GEMINI_API_KEY, ENV_VAR_OPENAI_API_KEY, NOT_A_PLANT_SENTINEL, REDACTED_PLACEHOLDER,
};
use crate::errors::{AIError, AppError, AppResult};
use crate::journal::PlantAnalysis;
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use serde_json::Value;
use std::env;
use std::fmt;
use tracing::{debug, info};

/// The two supported AI backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Structured-output vision and inline image generation.
    Gemini,
    /// Prompt-instructed JSON vision and base64 PNG generation.
    OpenAi,
}

impl Backend {
    /// Environment variable holding this backend's credential.
    pub fn credential_variable(&self) -> &'static str {
        match self {
            Backend::Gemini => ENV_VAR_GEMINI_API_KEY,
            Backend::OpenAi => ENV_VAR_OPENAI_API_KEY,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Gemini => write!(f, "Gemini"),
            Backend::OpenAi => write!(f, "OpenAI"),
        }
    }
}

/// Backend credentials as seen at one point in time.
#[derive(Clone, Default)]
pub struct Credentials {
    pub gemini_api_key: Option<String>,
    pub openai_api_key: Option<String>,
}

impl Credentials {
    /// Returns the key for `backend`, or a configuration error if it is unset.
    pub fn key_for(&self, backend: Backend) -> Result<&str, AIError> {
        let key = match backend {
            Backend::Gemini => self.gemini_api_key.as_deref(),
            Backend::OpenAi => self.openai_api_key.as_deref(),
        };
        key.filter(|k| !k.trim().is_empty())
            .ok_or(AIError::Configuration {
                backend,
                variable: backend.credential_variable(),
            })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |key: &Option<String>| key.as_ref().map(|_| REDACTED_PLACEHOLDER);
        f.debug_struct("Credentials")
            .field("gemini_api_key", &redact(&self.gemini_api_key))
            .field("openai_api_key", &redact(&self.openai_api_key))
            .finish()
    }
}

/// Somewhere credentials can be read from on every call.
pub trait CredentialSource: Send + Sync {
    fn credentials(&self) -> Credentials;
}

/// Reads credentials from the process environment each time it is asked.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvCredentials;

impl CredentialSource for EnvCredentials {
    fn credentials(&self) -> Credentials {
        Credentials {
            gemini_api_key: env::var(ENV_VAR_GEMINI_API_KEY).ok(),
            openai_api_key: env::var(ENV_VAR_OPENAI_API_KEY).ok(),
        }
    }
}

impl CredentialSource for Credentials {
    fn credentials(&self) -> Credentials {
        self.clone()
    }
}

/// Picks the backend for one call: the secondary credential wins when present.
///
/// ```
/// use sprout::ai::{select_backend, Backend, Credentials};
///
/// let only_gemini = Credentials { gemini_api_key: Some("g".into()), openai_api_key: None };
/// assert_eq!(select_backend(&only_gemini), Backend::Gemini);
///
/// let both = Credentials { gemini_api_key: Some("g".into()), openai_api_key: Some("o".into()) };
/// assert_eq!(select_backend(&both), Backend::OpenAi);
/// ```
pub fn select_backend(credentials: &Credentials) -> Backend {
    match credentials.openai_api_key.as_deref() {
        Some(key) if !key.trim().is_empty() => Backend::OpenAi,
        _ => Backend::Gemini,
    }
}

/// One AI backend able to identify plants and synthesize plant photos.
///
/// Implementations translate their native wire format. Answers are parsed
/// with `parse_analysis`, which already reports the sentinel; `identify_with`
/// checks it again and `generate_with` owns prompt styling.
pub trait PlantProvider: Send + Sync {
    fn backend(&self) -> Backend;

    /// Identifies the plant in `image`, parsing the backend's JSON answer.
    fn identify(&self, image: &DataUri) -> AppResult<PlantAnalysis>;

    /// Synthesizes one square image from an already-styled prompt.
    fn generate(&self, styled_prompt: &str) -> AppResult<DataUri>;
}

/// Runs identification on `provider` and applies the shared result checks.
pub fn identify_with(provider: &dyn PlantProvider, image: &DataUri) -> AppResult<PlantAnalysis> {
    let analysis = provider.identify(image)?;

    if analysis.common_name == NOT_A_PLANT_SENTINEL
        || analysis.scientific_name == NOT_A_PLANT_SENTINEL
    {
        info!("{} reported no plant in the image", provider.backend());
        return Err(AIError::NotAPlant.into());
    }

    info!(
        "{} identified {} ({})",
        provider.backend(),
        analysis.common_name,
        analysis.scientific_name
    );
    Ok(analysis)
}

/// Validates a description, styles it, and runs generation on `provider`.
pub fn generate_with(provider: &dyn PlantProvider, description: &str) -> AppResult<DataUri> {
    if description.trim().is_empty() {
        return Err(AppError::Input("Plant description cannot be empty".to_string()));
    }

    let prompt = super::prompts::styled_prompt(description);
    debug!("Generating image with {}", provider.backend());
    let image = provider.generate(&prompt)?;

    info!(
        "{} generated a {} image",
        provider.backend(),
        image.mime_type()
    );
    Ok(image)
}

/// Entry point for identify/generate that resolves the backend per call.
///
/// # Examples
///
/// ```no_run
/// use sprout::ai::{DataUri, EnvCredentials, PlantAi};
/// use sprout::config::AiConfig;
/// use std::path::Path;
///
/// let ai = PlantAi::new(AiConfig::load(), EnvCredentials);
/// let image = DataUri::from_path(Path::new("fern.jpg"))?;
/// let analysis = ai.identify(&image)?;
/// println!("{}", analysis.common_name);
/// # Ok::<(), sprout::AppError>(())
/// ```
pub struct PlantAi<C: CredentialSource> {
    config: AiConfig,
    credentials: C,
    http: Client,
}

impl<C: CredentialSource> PlantAi<C> {
    pub fn new(config: AiConfig, credentials: C) -> Self {
        Self {
            config,
            credentials,
            http: Client::new(),
        }
    }

    /// Builds the provider for a single operation from the current credentials.
    pub fn provider(&self) -> AppResult<Box<dyn PlantProvider>> {
        let credentials = self.credentials.credentials();
        let backend = select_backend(&credentials);
        let api_key = credentials.key_for(backend)?.to_string();
        debug!("Selected {} backend", backend);

        let provider: Box<dyn PlantProvider> = match backend {
            Backend::Gemini => Box::new(GeminiClient::new(
                self.http.clone(),
                &self.config,
                api_key,
            )),
            Backend::OpenAi => Box::new(OpenAiClient::new(
                self.http.clone(),
                &self.config,
                api_key,
            )),
        };
        Ok(provider)
    }

    pub fn identify(&self, image: &DataUri) -> AppResult<PlantAnalysis> {
        identify_with(self.provider()?.as_ref(), image)
    }

    pub fn generate(&self, description: &str) -> AppResult<DataUri> {
        generate_with(self.provider()?.as_ref(), description)
    }
}

/// Parses a backend's JSON text into an analysis.
///
/// Tolerates a surrounding markdown code fence, which prompt-only backends
/// sometimes add. A sentinel name in either name field is `NotAPlant` no
/// matter what else the answer holds. Otherwise every field must be present
/// with the right type; values themselves are taken as given.
pub(crate) fn parse_analysis(backend: Backend, text: &str) -> Result<PlantAnalysis, AIError> {
    let trimmed = text.trim();
    let json = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed);

    let value: Value = serde_json::from_str(json).map_err(|e| AIError::InvalidResponse {
        backend,
        message: format!("analysis is not valid JSON: {}", e),
    })?;

    if reports_no_plant(&value) {
        return Err(AIError::NotAPlant);
    }

    serde_json::from_value(value).map_err(|e| AIError::InvalidResponse {
        backend,
        message: format!("analysis does not match the expected shape: {}", e),
    })
}

fn reports_no_plant(value: &Value) -> bool {
    ["commonName", "scientificName"]
        .iter()
        .any(|field| value.get(*field).and_then(Value::as_str) == Some(NOT_A_PLANT_SENTINEL))
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Converts a non-success response into `AIError::Upstream`.
///
/// Both backends wrap failures as `{"error": {"message": ...}}`; that message
/// is preserved, falling back to the raw body.
pub(crate) fn upstream_error(backend: Backend, response: Response) -> AIError {
    let status = response.status().as_u16();
    let body = response.text().unwrap_or_default();
    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .map(|envelope| envelope.error.message)
        .unwrap_or(body);

    AIError::Upstream {
        backend,
        status,
        message,
    }
}
