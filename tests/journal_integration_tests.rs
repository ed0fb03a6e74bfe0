//! Integration tests for the file-backed journal store.

use chrono::{TimeZone, Utc};
use sprout::journal::{Difficulty, JournalEntry, LightLevel, PlantAnalysis, Toxicity};
use sprout::store::{FileStorage, JournalStore};
use std::fs;
use tempfile::tempdir;

fn analysis(common_name: &str) -> PlantAnalysis {
    PlantAnalysis {
        common_name: common_name.to_string(),
        scientific_name: "Epipremnum aureum".to_string(),
        description: "A trailing vine with heart-shaped leaves.".to_string(),
        light_requirement: LightLevel::Low,
        watering_requirement: LightLevel::Medium,
        temperature_range: "15-30°C".to_string(),
        toxicity: Toxicity::Toxic,
        difficulty: Difficulty::Easy,
        fun_facts: vec![
            "It is nearly impossible to kill.".to_string(),
            "It can grow in water alone.".to_string(),
        ],
    }
}

#[test]
fn test_journal_survives_reopen() {
    let dir = tempdir().unwrap();
    let data_dir = dir.path().join("sprout");

    {
        let store = JournalStore::open(&data_dir)
            .with_clock(|| Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap());
        let entry = JournalEntry::new(analysis("Pothos"), "data:image/png;base64,AAAA", store.now());
        store.save_entry(entry).unwrap();
        store.toggle_favorite("1709280000000").unwrap();
        store.add_note("1709280000000", "Moved to the bathroom").unwrap();
    }

    let reopened = JournalStore::open(&data_dir);
    let entries = reopened.list_entries();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, "1709280000000");
    assert!(entries[0].is_favorite);
    assert_eq!(entries[0].notes[0].text, "Moved to the bathroom");
}

#[test]
fn test_file_layout_is_flat_camel_case_array() {
    let dir = tempdir().unwrap();
    let store = JournalStore::open(dir.path());
    let now = Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap();
    store
        .save_entry(JournalEntry::new(analysis("Pothos"), "data:image/png;base64,AAAA", now))
        .unwrap();

    let path = FileStorage::new(dir.path()).path_for("plant-journal-entries");
    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    let entry = &raw.as_array().unwrap()[0];

    assert_eq!(entry["id"], "1705329000000");
    assert_eq!(entry["commonName"], "Pothos");
    assert_eq!(entry["lightRequirement"], "low");
    assert_eq!(entry["isFavorite"], false);
    assert_eq!(entry["notes"], serde_json::json!([]));
    assert_eq!(entry["dateAdded"], "2024-01-15T14:30:00Z");
}

#[test]
fn test_reads_entries_written_by_another_client() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("plant-journal-entries.json"),
        r#"[{
            "id": "1700000000000",
            "image": "data:image/jpeg;base64,/9j/",
            "dateAdded": "2023-11-14T22:13:20.000Z",
            "commonName": "Peace Lily",
            "scientificName": "Spathiphyllum wallisii",
            "description": "Glossy leaves and white spathes.",
            "lightRequirement": "medium",
            "wateringRequirement": "high",
            "temperatureRange": "18-27°C",
            "toxicity": "toxic",
            "difficulty": "easy",
            "funFacts": ["It droops when thirsty.", "It flowers in shade."]
        }]"#,
    )
    .unwrap();

    let store = JournalStore::open(dir.path());
    let entry = store.get_entry("1700000000000").unwrap();

    assert_eq!(entry.analysis.common_name, "Peace Lily");
    assert!(!entry.is_favorite);
    assert!(entry.notes.is_empty());
}

#[test]
fn test_corrupted_file_reads_as_empty_and_is_replaced_on_save() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plant-journal-entries.json");
    fs::write(&path, "{not json").unwrap();

    let store = JournalStore::open(dir.path());
    assert!(store.list_entries().is_empty());

    let now = Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap();
    store
        .save_entry(JournalEntry::new(analysis("Pothos"), "data:image/png;base64,AAAA", now))
        .unwrap();

    assert_eq!(store.list_entries().len(), 1);
    assert!(fs::read_to_string(&path).unwrap().starts_with('['));
}

#[test]
fn test_unreadable_journal_file_reads_as_empty() {
    let dir = tempdir().unwrap();
    // A directory where the journal file belongs cannot be read as text
    fs::create_dir(dir.path().join("plant-journal-entries.json")).unwrap();

    let store = JournalStore::open(dir.path());

    assert!(store.list_entries().is_empty());
    assert!(store.toggle_favorite("1705329000000").unwrap().is_none());
    assert!(store.add_note("1705329000000", "Repotted").unwrap().is_none());
}
