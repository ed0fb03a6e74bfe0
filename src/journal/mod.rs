//! Plant journal data model.
//!
//! `PlantAnalysis` is what an identification backend produces. A
//! `JournalEntry` is an analysis plus identity and lifecycle fields, and owns
//! an append-only list of `Note`s kept newest first.
//!
//! All types serialize with camelCase field names; this is the on-disk format
//! of the journal store and the shape identification backends are asked for.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Light or watering requirement of a plant.
///
/// Values outside the expected set are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightLevel {
    Low,
    Medium,
    High,
    #[serde(untagged)]
    Other(String),
}

/// Whether a plant is toxic to people or pets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Toxicity {
    Toxic,
    Safe,
    Unknown,
    #[serde(untagged)]
    Other(String),
}

/// How demanding a plant is to keep alive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    #[serde(untagged)]
    Other(String),
}

impl fmt::Display for LightLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LightLevel::Low => write!(f, "low"),
            LightLevel::Medium => write!(f, "medium"),
            LightLevel::High => write!(f, "high"),
            LightLevel::Other(value) => write!(f, "{}", value),
        }
    }
}

impl fmt::Display for Toxicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Toxicity::Toxic => write!(f, "toxic"),
            Toxicity::Safe => write!(f, "safe"),
            Toxicity::Unknown => write!(f, "unknown"),
            Toxicity::Other(value) => write!(f, "{}", value),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
            Difficulty::Other(value) => write!(f, "{}", value),
        }
    }
}

/// Species identification and care metadata produced by a backend.
///
/// Values are immutable once produced; the journal copies them into an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantAnalysis {
    pub common_name: String,
    pub scientific_name: String,
    pub description: String,
    pub light_requirement: LightLevel,
    pub watering_requirement: LightLevel,
    /// Free text, e.g. "18-27°C". Not validated.
    pub temperature_range: String,
    pub toxicity: Toxicity,
    pub difficulty: Difficulty,
    pub fun_facts: Vec<String>,
}

/// A dated, free-text annotation on a journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub date: DateTime<Utc>,
    pub text: String,
}

impl Note {
    /// Creates a note stamped with `now` under a fresh random id.
    pub fn new(text: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date: now,
            text: text.into(),
        }
    }
}

/// One saved plant in the user's journal.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use sprout::journal::{Difficulty, JournalEntry, LightLevel, PlantAnalysis, Toxicity};
///
/// let analysis = PlantAnalysis {
///     common_name: "Snake Plant".to_string(),
///     scientific_name: "Dracaena trifasciata".to_string(),
///     description: "Upright, sword-shaped leaves.".to_string(),
///     light_requirement: LightLevel::Low,
///     watering_requirement: LightLevel::Low,
///     temperature_range: "15-29°C".to_string(),
///     toxicity: Toxicity::Toxic,
///     difficulty: Difficulty::Easy,
///     fun_facts: vec!["Releases oxygen at night.".to_string()],
/// };
/// let now = Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap();
/// let entry = JournalEntry::new(analysis, "data:image/png;base64,AAAA", now);
///
/// assert_eq!(entry.id, "1705329000000");
/// assert!(!entry.is_favorite);
/// assert!(entry.notes.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    /// The photo as a data URI.
    pub image: String,
    pub date_added: DateTime<Utc>,
    #[serde(default)]
    pub is_favorite: bool,
    /// Newest first.
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(flatten)]
    pub analysis: PlantAnalysis,
}

impl JournalEntry {
    /// Builds a new, unfavorited entry with no notes.
    ///
    /// Two entries created within the same millisecond share an id; nothing
    /// here or in the store prevents that.
    pub fn new(analysis: PlantAnalysis, image: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: timestamp_id(now),
            image: image.into(),
            date_added: now,
            is_favorite: false,
            notes: Vec::new(),
            analysis,
        }
    }
}

fn timestamp_id(now: DateTime<Utc>) -> String {
    now.timestamp_millis().to_string()
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_entry_serializes_flat_camel_case() {
        let entry = fixtures::entry("1");
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["id"], "1");
        assert_eq!(value["commonName"], "Swiss Cheese Plant");
        assert_eq!(value["scientificName"], "Monstera deliciosa");
        assert_eq!(value["lightRequirement"], "medium");
        assert_eq!(value["toxicity"], "toxic");
        assert_eq!(value["difficulty"], "easy");
        assert_eq!(value["isFavorite"], false);
        assert_eq!(value["dateAdded"], "2024-01-15T14:30:00Z");
        assert!(value["notes"].as_array().unwrap().is_empty());
        assert!(value.get("analysis").is_none());
    }

    #[test]
    fn test_entry_defaults_missing_lifecycle_fields() {
        let json = r#"{
            "id": "42",
            "image": "data:image/jpeg;base64,/9j/",
            "dateAdded": "2024-03-01T08:00:00Z",
            "commonName": "Pothos",
            "scientificName": "Epipremnum aureum",
            "description": "Trailing vine.",
            "lightRequirement": "low",
            "wateringRequirement": "medium",
            "temperatureRange": "15-30°C",
            "toxicity": "toxic",
            "difficulty": "easy",
            "funFacts": ["Nearly indestructible."]
        }"#;

        let entry: JournalEntry = serde_json::from_str(json).unwrap();
        assert!(!entry.is_favorite);
        assert!(entry.notes.is_empty());
        assert_eq!(entry.analysis.watering_requirement, LightLevel::Medium);
    }

    #[test]
    fn test_analysis_keeps_unexpected_enum_values() {
        let mut value = serde_json::to_value(fixtures::monstera()).unwrap();
        value["lightRequirement"] = serde_json::json!("bright indirect");
        value["difficulty"] = serde_json::json!("extreme");

        let analysis: PlantAnalysis = serde_json::from_value(value).unwrap();
        assert_eq!(
            analysis.light_requirement,
            LightLevel::Other("bright indirect".to_string())
        );
        assert_eq!(analysis.difficulty.to_string(), "extreme");

        // Stored back exactly as received
        let stored = serde_json::to_value(&analysis).unwrap();
        assert_eq!(stored["lightRequirement"], "bright indirect");
        assert_eq!(stored["toxicity"], "toxic");
    }

    #[test]
    fn test_analysis_still_requires_every_field() {
        let mut value = serde_json::to_value(fixtures::monstera()).unwrap();
        value.as_object_mut().unwrap().remove("funFacts");

        assert!(serde_json::from_value::<PlantAnalysis>(value).is_err());
    }

    #[test]
    fn test_notes_in_same_instant_get_distinct_ids() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap();
        let first = Note::new("Watered today", now);
        let second = Note::new("Rotated the pot", now);

        assert_ne!(first.id, second.id);
        assert!(Uuid::parse_str(&first.id).is_ok());
        assert_eq!(first.date, now);
        assert_eq!(first.text, "Watered today");
    }

    #[test]
    fn test_enum_display_matches_wire_format() {
        assert_eq!(LightLevel::High.to_string(), "high");
        assert_eq!(Toxicity::Unknown.to_string(), "unknown");
        assert_eq!(Difficulty::Hard.to_string(), "hard");
    }
}
