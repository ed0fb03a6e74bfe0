//! OpenAI backend.
//!
//! Identification goes through chat completions. The schema is described in
//! the system prompt only (`json_object` mode guarantees JSON, not shape), so
//! the content is parsed and validated locally. Image generation returns a
//! single `b64_json` blob that is always PNG.

use super::data_uri::DataUri;
use super::prompts::identify_instruction;
use super::provider::{parse_analysis, upstream_error, Backend, PlantProvider};
use crate::config::AiConfig;
use crate::constants::{GENERATED_IMAGE_SIZE, OPENAI_IMAGE_MIME};
use crate::errors::{AIError, AppResult};
use crate::journal::PlantAnalysis;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ImageDatum {
    #[serde(default)]
    b64_json: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    #[serde(default)]
    data: Vec<ImageDatum>,
}

/// Client for the OpenAI chat completions and image generation APIs.
pub struct OpenAiClient {
    http: Client,
    base_url: String,
    model: String,
    image_model: String,
    language: String,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(http: Client, config: &AiConfig, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: config.openai_base_url.clone(),
            model: config.openai_model.clone(),
            image_model: config.openai_image_model.clone(),
            language: config.language.clone(),
            api_key: api_key.into(),
        }
    }

    fn post<T: DeserializeOwned>(&self, path: &str, body: &Value) -> AppResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .map_err(|source| AIError::Transport {
                backend: Backend::OpenAi,
                source,
            })?;

        if !response.status().is_success() {
            return Err(upstream_error(Backend::OpenAi, response).into());
        }

        let parsed = response.json().map_err(|e| AIError::InvalidResponse {
            backend: Backend::OpenAi,
            message: format!("Failed to parse response from {}: {}", path, e),
        })?;
        Ok(parsed)
    }
}

impl PlantProvider for OpenAiClient {
    fn backend(&self) -> Backend {
        Backend::OpenAi
    }

    fn identify(&self, image: &DataUri) -> AppResult<PlantAnalysis> {
        let body = json!({
            "model": self.model,
            "response_format": { "type": "json_object" },
            "messages": [
                { "role": "system", "content": identify_instruction(&self.language) },
                {
                    "role": "user",
                    "content": [
                        { "type": "text", "text": "Identify this plant." },
                        { "type": "image_url", "image_url": { "url": image.to_string() } }
                    ]
                }
            ]
        });

        let response: ChatResponse = self.post("/v1/chat/completions", &body)?;
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AIError::InvalidResponse {
                backend: Backend::OpenAi,
                message: "chat completion contained no message content".to_string(),
            })?;

        Ok(parse_analysis(Backend::OpenAi, &content)?)
    }

    fn generate(&self, styled_prompt: &str) -> AppResult<DataUri> {
        let body = json!({
            "model": self.image_model,
            "prompt": styled_prompt,
            "n": 1,
            "size": GENERATED_IMAGE_SIZE,
            "response_format": "b64_json"
        });

        let response: ImageResponse = self.post("/v1/images/generations", &body)?;
        let payload = response
            .data
            .into_iter()
            .find_map(|datum| datum.b64_json)
            .filter(|payload| !payload.is_empty())
            .ok_or(AIError::NoImageProduced)?;

        let image = DataUri::from_base64(OPENAI_IMAGE_MIME, payload).map_err(|e| {
            AIError::InvalidResponse {
                backend: Backend::OpenAi,
                message: format!("b64_json is not valid base64: {}", e),
            }
        })?;
        Ok(image)
    }
}
