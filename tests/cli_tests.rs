use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const JOURNAL_FILE: &str = "plant-journal-entries.json";

// Helper function to set up a test Command instance
fn set_up_command(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("sprout").unwrap();
    // No credentials and no network: only the local journal is reachable
    cmd.env_clear()
        .env("HOME", "/tmp")
        .env("SPROUT_DIR", data_dir)
        .env("SPROUT_GEMINI_BASE_URL", "http://127.0.0.1:9")
        .env("SPROUT_OPENAI_BASE_URL", "http://127.0.0.1:9");
    cmd
}

fn seed_journal(data_dir: &Path) {
    fs::write(
        data_dir.join(JOURNAL_FILE),
        r#"[
          {
            "id": "1705329000000",
            "image": "data:image/png;base64,iVBORw0KGgo=",
            "dateAdded": "2024-01-15T14:30:00Z",
            "isFavorite": false,
            "notes": [],
            "commonName": "Swiss Cheese Plant",
            "scientificName": "Monstera deliciosa",
            "description": "A climbing evergreen with split leaves.",
            "lightRequirement": "medium",
            "wateringRequirement": "medium",
            "temperatureRange": "18-27°C",
            "toxicity": "toxic",
            "difficulty": "easy",
            "funFacts": ["Its fruit is edible when ripe.", "It climbs with aerial roots."]
          }
        ]"#,
    )
    .unwrap();
}

fn read_journal(data_dir: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(data_dir.join(JOURNAL_FILE)).unwrap()).unwrap()
}

#[test]
fn test_cli_requires_subcommand() {
    let dir = tempdir().unwrap();
    set_up_command(dir.path()).assert().failure();
}

#[test]
fn test_cli_list_empty_journal() {
    let dir = tempdir().unwrap();

    set_up_command(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No journal entries yet."));

    // Listing never creates the journal file
    assert!(!dir.path().join(JOURNAL_FILE).exists());
}

#[test]
fn test_cli_list_and_show() {
    let dir = tempdir().unwrap();
    seed_journal(dir.path());

    set_up_command(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1705329000000"))
        .stdout(predicate::str::contains("Swiss Cheese Plant (Monstera deliciosa)"));

    set_up_command(dir.path())
        .args(["show", "1705329000000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Toxicity:    toxic"))
        .stdout(predicate::str::contains("- It climbs with aerial roots."));
}

#[test]
fn test_cli_favorite_and_note_persist() {
    let dir = tempdir().unwrap();
    seed_journal(dir.path());

    set_up_command(dir.path())
        .args(["favorite", "1705329000000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("is now a favorite"));

    set_up_command(dir.path())
        .args(["note", "1705329000000", "  Wiped the leaves  "])
        .assert()
        .success()
        .stdout(predicate::str::contains("(1 notes)"));

    let journal = read_journal(dir.path());
    assert_eq!(journal[0]["isFavorite"], true);
    assert_eq!(journal[0]["notes"][0]["text"], "Wiped the leaves");

    set_up_command(dir.path())
        .args(["list", "--favorites"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Swiss Cheese Plant"));
}

#[test]
fn test_cli_missing_entry_fails() {
    let dir = tempdir().unwrap();
    seed_journal(dir.path());

    set_up_command(dir.path())
        .args(["favorite", "404"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No journal entry with id 404"));

    set_up_command(dir.path())
        .args(["show", "404"])
        .assert()
        .failure();
}

#[test]
fn test_cli_empty_note_rejected() {
    let dir = tempdir().unwrap();
    seed_journal(dir.path());
    let before = fs::read_to_string(dir.path().join(JOURNAL_FILE)).unwrap();

    set_up_command(dir.path())
        .args(["note", "1705329000000", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Note text cannot be empty"));

    let after = fs::read_to_string(dir.path().join(JOURNAL_FILE)).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_cli_delete() {
    let dir = tempdir().unwrap();
    seed_journal(dir.path());

    set_up_command(dir.path())
        .args(["delete", "1705329000000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted entry 1705329000000"));

    assert_eq!(read_journal(dir.path()), serde_json::json!([]));

    set_up_command(dir.path())
        .args(["delete", "1705329000000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No journal entry with id"));
}

#[test]
fn test_cli_identify_without_credentials() {
    let dir = tempdir().unwrap();
    let photo = dir.path().join("leaf.jpg");
    fs::write(&photo, [0xFF, 0xD8, 0xFF]).unwrap();

    set_up_command(dir.path())
        .arg("identify")
        .arg(&photo)
        .assert()
        .failure()
        .stderr(predicate::str::contains("GEMINI_API_KEY"));
}

#[test]
fn test_cli_generate_blank_description() {
    let dir = tempdir().unwrap();

    set_up_command(dir.path())
        .env("GEMINI_API_KEY", "unused")
        .args(["generate", "  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Plant description cannot be empty"));
}

#[test]
fn test_cli_json_logs() {
    let dir = tempdir().unwrap();

    set_up_command(dir.path())
        .args(["list", "--log-format", "json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("\"correlation_id\""));
}
