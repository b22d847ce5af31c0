//! End-to-end tests for the `solfa` binary.
//!
//! Every run points `--config` at a temp file and disables the backend through
//! the environment, so nothing here touches the network or the user's config.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn solfa(dir: &TempDir) -> Command {
    let config = dir.path().join("choir.toml");
    if !config.exists() {
        std::fs::write(&config, "").unwrap();
    }

    let mut cmd = Command::cargo_bin("solfa").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join(".config"))
        .env("CHOIR_LLM_ENABLED", "false")
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("CHOIR_LLM_URL")
        .env_remove("CHOIR_CONFIG")
        .arg("--config")
        .arg(&config);
    cmd
}

fn stdout_json(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).unwrap()
}

#[test]
fn test_generate_all_parts_offline() {
    let dir = TempDir::new().unwrap();
    let output = solfa(&dir)
        .args(["generate", "Joyful praise we sing", "--offline"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output.stdout),
        serde_json::json!({
            "soprano": ["do", "re", "mi", "fa"],
            "alto": ["mi", "fa", "sol", "la"],
            "tenor": ["sol", "la", "ti", "do"],
            "bass": ["ti", "do", "re", "mi"],
        })
    );
}

#[test]
fn test_generate_selected_parts() {
    let dir = TempDir::new().unwrap();
    let output = solfa(&dir)
        .args(["generate", "Holy holy", "--parts", "bass,Soprano"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output.stdout),
        serde_json::json!({"soprano": ["do", "re"], "bass": ["ti", "do"]})
    );
}

#[test]
fn test_generate_reads_lyrics_file() {
    let dir = TempDir::new().unwrap();
    let lyrics = dir.path().join("hymn.txt");
    std::fs::write(&lyrics, "Amazing grace\nhow sweet\n").unwrap();

    let output = solfa(&dir)
        .args(["generate", "--parts", "alto", "--file"])
        .arg(&lyrics)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output.stdout),
        serde_json::json!({"alto": ["mi", "fa", "sol", "la"]})
    );
}

#[test]
fn test_generate_explain_reports_fallback() {
    let dir = TempDir::new().unwrap();
    solfa(&dir)
        .args(["generate", "Amen", "--parts", "tenor", "--explain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"source\": \"fallback\""))
        .stdout(predicate::str::contains("no completion backend configured"));
}

#[test]
fn test_generate_table_output() {
    let dir = TempDir::new().unwrap();
    solfa(&dir)
        .args(["generate", "Glory to God", "--format", "table", "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lyrics   Glory to God"))
        .stdout(predicate::str::contains("soprano  do    re mi"))
        .stdout(predicate::str::contains("bass     ti    do re"));
}

#[test]
fn test_generate_rejects_unknown_part() {
    let dir = TempDir::new().unwrap();
    solfa(&dir)
        .args(["generate", "Amen", "--parts", "mezzo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("mezzo"));
}

#[test]
fn test_generate_requires_lyrics() {
    let dir = TempDir::new().unwrap();
    solfa(&dir).arg("generate").assert().failure();
}

#[test]
fn test_validate_accepts_in_range_sequence() {
    let dir = TempDir::new().unwrap();
    solfa(&dir)
        .args(["validate", "--part", "soprano", "do", "Mi", "la"])
        .assert()
        .success()
        .stdout(predicate::str::contains("syllable_set: ok"))
        .stdout(predicate::str::contains("voice_range: ok (soprano do-la)"));
}

#[test]
fn test_validate_rejects_out_of_range() {
    let dir = TempDir::new().unwrap();
    solfa(&dir)
        .args(["validate", "--part", "bass", "do", "ti"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("voice_range: FAIL (ti outside do-mi)"));
}

#[test]
fn test_validate_rejects_unknown_syllable() {
    let dir = TempDir::new().unwrap();
    solfa(&dir)
        .args(["validate", "--part", "alto", "mi", "so"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("syllable_set: FAIL (so)"));
}

#[test]
fn test_config_shows_file_values_and_sources() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("choir.toml"),
        "[defaults]\nkey = \"G\"\n\n[backend]\napi_key = \"sk-secret\"\n",
    )
    .unwrap();

    solfa(&dir)
        .args(["config", "--sources"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# file: "))
        .stdout(predicate::str::contains("# env: CHOIR_LLM_ENABLED"))
        .stdout(predicate::str::contains("key = \"G\""))
        .stdout(predicate::str::contains("sk-secret").not());
}

#[test]
fn test_broken_config_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("choir.toml"), "[backend\nenabled = ").unwrap();

    solfa(&dir)
        .args(["generate", "Amen", "--offline"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}
