//! Instructions, response schema, and prompt builders for the AI backends.
//!
//! Both backends receive the same identification instruction. The Gemini
//! backend additionally gets `analysis_schema()` as an enforced response
//! schema; the OpenAI backend only sees the schema described in the system
//! prompt, so its output is validated after parsing.

use crate::constants::{FUN_FACT_COUNT, IMAGE_STYLE_SUFFIX, NOT_A_PLANT_SENTINEL};
use serde_json::{json, Value};

/// Builds the identification instruction for the given target language.
///
/// # Examples
///
/// ```
/// use sprout::ai::prompts::identify_instruction;
///
/// let prompt = identify_instruction("Spanish");
/// assert!(prompt.contains("Spanish"));
/// assert!(prompt.contains("\"Unknown\""));
/// ```
pub fn identify_instruction(language: &str) -> String {
    format!(
        r#"You are a botanist. Identify the plant species in the image.

Return every text field (commonName, description, temperatureRange, funFacts) in {language}.
Keep scientificName in Latin.

Respond with JSON only, matching this shape exactly:
{{
  "commonName": string,
  "scientificName": string,
  "description": string (two or three sentences),
  "lightRequirement": "low" | "medium" | "high",
  "wateringRequirement": "low" | "medium" | "high",
  "temperatureRange": string (e.g. "18-27°C"),
  "toxicity": "toxic" | "safe" | "unknown",
  "difficulty": "easy" | "medium" | "hard",
  "funFacts": array of exactly {count} strings
}}

If the image does not show a plant, set both commonName and scientificName to "{sentinel}"."#,
        language = language,
        count = FUN_FACT_COUNT,
        sentinel = NOT_A_PLANT_SENTINEL,
    )
}

/// JSON schema of `PlantAnalysis` in the OpenAPI subset Gemini accepts.
pub fn analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "commonName": { "type": "STRING" },
            "scientificName": { "type": "STRING" },
            "description": { "type": "STRING" },
            "lightRequirement": { "type": "STRING", "enum": ["low", "medium", "high"] },
            "wateringRequirement": { "type": "STRING", "enum": ["low", "medium", "high"] },
            "temperatureRange": { "type": "STRING" },
            "toxicity": { "type": "STRING", "enum": ["toxic", "safe", "unknown"] },
            "difficulty": { "type": "STRING", "enum": ["easy", "medium", "hard"] },
            "funFacts": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "minItems": FUN_FACT_COUNT,
                "maxItems": FUN_FACT_COUNT
            }
        },
        "required": [
            "commonName",
            "scientificName",
            "description",
            "lightRequirement",
            "wateringRequirement",
            "temperatureRange",
            "toxicity",
            "difficulty",
            "funFacts"
        ]
    })
}

/// Appends the fixed photographic style suffix to a plant description.
///
/// Callers pass the bare description; the suffix is added exactly once here.
///
/// ```
/// use sprout::ai::prompts::styled_prompt;
///
/// assert_eq!(
///     styled_prompt("a fern in a clay pot"),
///     "a fern in a clay pot, photorealistic, high-quality, botanical-photography style, isolated subject"
/// );
/// ```
pub fn styled_prompt(description: &str) -> String {
    format!("{}, {}", description.trim(), IMAGE_STYLE_SUFFIX)
}
