//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn quizgrade() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("quizgrade").unwrap()
}

const BANK_TOML: &str = r#"
[bank]
id = "hardware"
name = "Hardware"

[[questions]]
id = "Q1"
type = "radio"
question = "Pick one"
choices = ["a", "b", "c"]
correctIndex = 1

[[questions]]
id = "Q2"
type = "checkbox"
question = "Pick some"
choices = ["a", "b", "c"]
correctIndexes = [0, 2]

[[questions]]
id = "Q3"
type = "text"
question = "Processor?"
correctText = "CPU"
"#;

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn grade_json_output() {
    let dir = TempDir::new().unwrap();
    let bank = write(dir.path(), "bank.toml", BANK_TOML);
    let answers = write(
        dir.path(),
        "answers.json",
        r#"{"answers":[{"id":"Q1","value":1},{"id":"Q2","value":[2,0]},{"id":"Q3","value":" cpu "}]}"#,
    );

    let output = quizgrade()
        .arg("grade")
        .arg("--bank")
        .arg(&bank)
        .arg("--answers")
        .arg(&answers)
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let result: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(
        result,
        serde_json::json!({
            "score": 3,
            "total": 3,
            "results": [
                { "id": "Q1", "correct": true },
                { "id": "Q2", "correct": true },
                { "id": "Q3", "correct": true }
            ]
        })
    );
}

#[test]
fn grade_text_output_with_bare_array() {
    let dir = TempDir::new().unwrap();
    let bank = write(dir.path(), "bank.toml", BANK_TOML);
    let answers = write(dir.path(), "answers.json", r#"[{"id":"Q1","value":0}]"#);

    quizgrade()
        .arg("grade")
        .arg("--bank")
        .arg(&bank)
        .arg("--answers")
        .arg(&answers)
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 0 / 3 (0%)"))
        .stdout(predicate::str::contains("incorrect"))
        .stdout(predicate::str::contains("Keep practicing!"));
}

#[test]
fn grade_against_builtin_bank() {
    let dir = TempDir::new().unwrap();
    let answers = write(
        dir.path(),
        "answers.json",
        r#"{"answers":[{"id":1,"value":2},{"id":9999,"value":0}]}"#,
    );

    quizgrade()
        .arg("grade")
        .arg("--answers")
        .arg(&answers)
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 1 / 12 (8%)"))
        .stdout(predicate::str::contains("(unknown question)"));
}

#[test]
fn grade_rejects_malformed_answers() {
    let dir = TempDir::new().unwrap();
    let answers = write(dir.path(), "answers.json", r#"{"answers":[{"id":1}]}"#);

    quizgrade()
        .arg("grade")
        .arg("--answers")
        .arg(&answers)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            r#"Each answer must have "id" and "value" fields"#,
        ));
}

#[test]
fn validate_valid_bank() {
    let dir = TempDir::new().unwrap();
    let bank = write(dir.path(), "bank.toml", BANK_TOML);

    quizgrade()
        .arg("validate")
        .arg("--bank")
        .arg(&bank)
        .assert()
        .success()
        .stdout(predicate::str::contains("Hardware (3 questions)"))
        .stdout(predicate::str::contains("All banks valid"));
}

#[test]
fn validate_directory_reports_warnings() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "bank.toml", BANK_TOML);
    write(
        dir.path(),
        "soft.toml",
        r#"
[bank]
id = "soft"
name = "Soft"

[[questions]]
id = 1
type = "text"
question = "Say"
correctText = ""
"#,
    );

    quizgrade()
        .arg("validate")
        .arg("--bank")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Hardware"))
        .stdout(predicate::str::contains("Soft"))
        .stdout(predicate::str::contains("1 warning(s) found"));
}

#[test]
fn validate_rejects_broken_bank() {
    let dir = TempDir::new().unwrap();
    let bank = write(
        dir.path(),
        "broken.toml",
        r#"
[bank]
id = "broken"
name = "Broken"

[[questions]]
id = 1
type = "radio"
question = "Pick"
choices = ["a"]
correctIndex = 3
"#,
    );

    quizgrade()
        .arg("validate")
        .arg("--bank")
        .arg(&bank)
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn validate_nonexistent_file() {
    quizgrade()
        .arg("validate")
        .arg("--bank")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn list_builtin_bank() {
    quizgrade()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("What is the capital of France?"))
        .stdout(predicate::str::contains("12 question(s)"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    quizgrade()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created quizgrade.toml"))
        .stdout(predicate::str::contains("Created banks/example.toml"));

    assert!(dir.path().join("quizgrade.toml").exists());
    assert!(dir.path().join("banks/example.toml").exists());

    // The generated bank is itself valid
    quizgrade()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--bank")
        .arg("banks/example.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("All banks valid"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    // First init
    quizgrade()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    // Second init should skip
    quizgrade()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn help_output() {
    quizgrade()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Quiz question server and answer grader"));
}

#[test]
fn version_output() {
    quizgrade()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("quizgrade"));
}
