//! Gemini backend.
//!
//! Identification uses server-side structured output: the request carries
//! `analysis_schema()` as `responseSchema`, so the answer is JSON text in the
//! first candidate. Image generation returns inline base64 parts mixed with
//! text parts; the first part carrying image data wins.

use super::data_uri::DataUri;
use super::prompts::{analysis_schema, identify_instruction};
use super::provider::{parse_analysis, upstream_error, Backend, PlantProvider};
use crate::config::AiConfig;
use crate::errors::{AIError, AppResult};
use crate::journal::PlantAnalysis;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(alias = "mime_type")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default)]
    text: Option<String>,
    #[serde(default, alias = "inline_data")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Default, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// Client for the Gemini `generateContent` API.
pub struct GeminiClient {
    http: Client,
    base_url: String,
    model: String,
    image_model: String,
    language: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(http: Client, config: &AiConfig, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: config.gemini_base_url.clone(),
            model: config.gemini_model.clone(),
            image_model: config.gemini_image_model.clone(),
            language: config.language.clone(),
            api_key: api_key.into(),
        }
    }

    fn generate_content(&self, model: &str, body: &Value) -> AppResult<GenerateContentResponse> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .map_err(|source| AIError::Transport {
                backend: Backend::Gemini,
                source,
            })?;

        if !response.status().is_success() {
            return Err(upstream_error(Backend::Gemini, response).into());
        }

        let parsed = response.json().map_err(|e| AIError::InvalidResponse {
            backend: Backend::Gemini,
            message: format!("Failed to parse generateContent response: {}", e),
        })?;
        Ok(parsed)
    }
}

impl PlantProvider for GeminiClient {
    fn backend(&self) -> Backend {
        Backend::Gemini
    }

    fn identify(&self, image: &DataUri) -> AppResult<PlantAnalysis> {
        let body = json!({
            "contents": [{
                "parts": [
                    { "inlineData": { "mimeType": image.mime_type(), "data": image.payload() } },
                    { "text": identify_instruction(&self.language) }
                ]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": analysis_schema()
            }
        });

        let response = self.generate_content(&self.model, &body)?;
        let text: String = response
            .candidates
            .first()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AIError::InvalidResponse {
                backend: Backend::Gemini,
                message: "response contained no text".to_string(),
            }
            .into());
        }

        Ok(parse_analysis(Backend::Gemini, &text)?)
    }

    fn generate(&self, styled_prompt: &str) -> AppResult<DataUri> {
        let body = json!({
            "contents": [{ "parts": [{ "text": styled_prompt }] }],
            "generationConfig": {
                "responseModalities": ["TEXT", "IMAGE"],
                "imageConfig": { "aspectRatio": "1:1" }
            }
        });

        let response = self.generate_content(&self.image_model, &body)?;
        let inline = response
            .candidates
            .iter()
            .flat_map(|candidate| candidate.content.parts.iter())
            .find_map(|part| part.inline_data.as_ref())
            .ok_or(AIError::NoImageProduced)?;

        let image = DataUri::from_base64(inline.mime_type.clone(), inline.data.clone()).map_err(
            |e| AIError::InvalidResponse {
                backend: Backend::Gemini,
                message: format!("image part is not a valid data URI: {}", e),
            },
        )?;
        Ok(image)
    }
}
