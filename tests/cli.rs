// Non-interactive paths of the binary. Every run gets its own HOME so the
// progress, config and log files land in a temp dir.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use tempfile::{tempdir, TempDir};

fn slowka(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("slowka").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("XDG_STATE_HOME");
    cmd
}

fn progress_file(home: &TempDir) -> std::path::PathBuf {
    home.path()
        .join(".local")
        .join("state")
        .join("slowka")
        .join("progress.json")
}

fn write_unit(root: &Path, id: &str, json: &str) {
    let dir = root.join(id);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("words.json"), json).unwrap();
}

#[test]
fn list_prints_bundled_units_in_natural_order() {
    let home = tempdir().unwrap();
    let output = slowka(&home).arg("--list").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let ids: Vec<&str> = stdout
        .lines()
        .filter(|l| !l.starts_with("    "))
        .filter_map(|l| l.split_whitespace().find(|w| w.starts_with("Unit")))
        .collect();
    assert_eq!(ids, ["Unit1", "Unit2", "Unit3", "Unit10"]);
    assert!(stdout.contains("Unit 1 - Animals (14 words)"));
}

#[test]
fn list_shows_saved_progress() {
    let home = tempdir().unwrap();
    let path = progress_file(&home);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, r#"{"completedUnits":["Unit3"]}"#).unwrap();

    let output = slowka(&home).arg("--list").output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let unit3 = stdout.lines().find(|l| l.contains("Unit3")).unwrap();
    assert!(unit3.starts_with('✓'));
}

#[test]
fn reset_progress_clears_the_file() {
    let home = tempdir().unwrap();
    let path = progress_file(&home);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, r#"{"completedUnits":["Unit1","Unit2"]}"#).unwrap();

    let output = slowka(&home).arg("--reset-progress").output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("progress cleared"));

    assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"completedUnits":[]}"#);
}

#[test]
fn custom_words_dir() {
    let home = tempdir().unwrap();
    let words = tempdir().unwrap();
    write_unit(
        words.path(),
        "Week2",
        r#"{"title": "Week 2", "groups": [{"name": "All", "words": [{"en": "train", "pl": "pociąg"}]}]}"#,
    );
    write_unit(
        words.path(),
        "Week10",
        r#"{"title": "Week 10", "groups": [{"name": "All", "words": []}]}"#,
    );

    let output = slowka(&home)
        .arg("--list")
        .arg("--words-dir")
        .arg(words.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let week2 = stdout.find("Week 2 (1 words)").unwrap();
    let week10 = stdout.find("Week 10 (0 words)").unwrap();
    assert!(week2 < week10);
}

#[test]
fn malformed_word_list_fails() {
    let home = tempdir().unwrap();
    let words = tempdir().unwrap();
    write_unit(words.path(), "Unit1", "{ not json");

    let output = slowka(&home)
        .args(["--list", "--words-dir"])
        .arg(words.path())
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Error: Invalid word list"));
    assert!(stderr.contains("words.json"));
}

#[test]
fn invalid_difficulties_fail_fast() {
    let home = tempdir().unwrap();
    let levels = home.path().join("levels.json");
    fs::write(
        &levels,
        r#"{"difficulties": [{"id": "x", "name": "X", "blankPercentage": 1.5}]}"#,
    )
    .unwrap();

    let output = slowka(&home)
        .arg("--list")
        .arg("--difficulties")
        .arg(&levels)
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(r#"blankPercentage for "x" must be > 0 and < 1, got 1.5"#));
    assert!(!stderr.contains("BlankPercentageOutOfRange"));
}

#[test]
fn duplicate_difficulty_ids_fail_fast() {
    let home = tempdir().unwrap();
    let levels = home.path().join("levels.json");
    fs::write(
        &levels,
        r#"{"difficulties": [
            {"id": "x", "name": "X", "blankPercentage": 0.3},
            {"id": "x", "name": "Again", "blankPercentage": 0.6}
        ]}"#,
    )
    .unwrap();

    let output = slowka(&home)
        .arg("--list")
        .arg("--difficulties")
        .arg(&levels)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains(r#"Duplicate difficulty id: "x""#));
}

#[test]
fn save_config_writes_resolved_settings() {
    let home = tempdir().unwrap();
    slowka(&home)
        .args(["--save-config", "--mode", "fill-in-blanks", "--log-level", "debug"])
        .assert()
        .success();

    let path = home.path().join(".config").join("slowka").join("config.json");
    let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(saved["default_mode"], "fill-in-blanks");
    assert_eq!(saved["log_level"], "debug");
}

#[test]
fn interactive_run_requires_a_tty() {
    let home = tempdir().unwrap();
    let output = slowka(&home).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("stdin must be a tty"));
}
