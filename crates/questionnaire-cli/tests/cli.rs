use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn questionnaire(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("questionnaire").unwrap();
    cmd.env("XDG_CONFIG_HOME", home.path())
        .env("HOME", home.path())
        .env_remove("LC_ALL")
        .env_remove("LC_MESSAGES")
        .env_remove("RUST_LOG")
        .env("LANG", "en_US.UTF-8");
    cmd
}

const ANSWERS: &str = r#"{
  "userType": "Architect",
  "projectType": "For a client",
  "space": ["Floor", "Wall"],
  "area": 42,
  "surface": "Raw Concrete",
  "name": "Jane Doe",
  "email": "jane@example.com"
}"#;

#[test]
fn locales_lists_builtin_catalogs() {
    let home = TempDir::new().unwrap();
    questionnaire(&home)
        .args(["--locale", "hr_HR.UTF-8", "locales"])
        .assert()
        .success()
        .stdout(predicate::str::contains("* hr"))
        .stdout(predicate::str::contains("en\tMicrocement Questionnaire (default)"))
        .stdout(predicate::str::contains("de"));
}

#[test]
fn check_reports_builtin_form() {
    let home = TempDir::new().unwrap();
    questionnaire(&home)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("form: microcement 1.0.0 (6 steps)"))
        .stdout(predicate::str::contains("locales: de, en, hr (default en)"))
        .stdout(predicate::str::ends_with("ok\n"));
}

#[test]
fn check_fails_on_incomplete_catalog() {
    let home = TempDir::new().unwrap();
    let locales = home.path().join("i18n");
    fs::create_dir(&locales).unwrap();
    fs::write(locales.join("en.json"), r#"{"strings": {"form.title": "Only a title"}}"#).unwrap();
    let config = home.path().join("wizard.toml");
    fs::write(&config, "locales_dir = \"i18n\"\n").unwrap();

    questionnaire(&home)
        .arg("--config")
        .arg(&config)
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required key"));
}

#[test]
fn schema_prints_json_schema() {
    let home = TempDir::new().unwrap();
    let output = questionnaire(&home).arg("schema").output().unwrap();
    assert!(output.status.success());
    let schema: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(schema["title"], "StepSchemaDoc");

    questionnaire(&home)
        .args(["schema", "--catalog"])
        .assert()
        .success()
        .stdout(predicate::str::contains("LocaleTable"));
}

#[test]
fn run_replays_answers_and_appends_submission() {
    let home = TempDir::new().unwrap();
    let answers = home.path().join("answers.json");
    fs::write(&answers, ANSWERS).unwrap();
    let out = home.path().join("submissions.jsonl");

    let output = questionnaire(&home)
        .arg("run")
        .arg("--answers")
        .arg(&answers)
        .arg("--out")
        .arg(&out)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let printed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(printed["area"], "42");
    assert_eq!(printed["surface"], serde_json::json!(["Raw Concrete"]));
    assert_eq!(printed["phone"], "");

    let written = fs::read_to_string(&out).unwrap();
    assert_eq!(written.lines().count(), 1);
    let record: serde_json::Value = serde_json::from_str(written.trim()).unwrap();
    assert_eq!(record, printed);
}

#[test]
fn run_uses_config_submissions_path() {
    let home = TempDir::new().unwrap();
    let answers = home.path().join("answers.json");
    fs::write(&answers, ANSWERS).unwrap();
    let config = home.path().join("wizard.toml");
    fs::write(&config, "submissions = \"offers.jsonl\"\n").unwrap();

    questionnaire(&home)
        .arg("--config")
        .arg(&config)
        .arg("run")
        .arg("--answers")
        .arg(&answers)
        .assert()
        .success();
    assert!(home.path().join("offers.jsonl").is_file());
}

#[test]
fn run_rejects_incomplete_answers() {
    let home = TempDir::new().unwrap();
    let answers = home.path().join("answers.json");
    fs::write(&answers, r#"{"userType": "Architect", "projectType": "For myself"}"#).unwrap();

    questionnaire(&home)
        .arg("run")
        .arg("--answers")
        .arg(&answers)
        .assert()
        .failure()
        .stderr(predicate::str::contains("answers for step 3 (space) are incomplete"));
}

#[test]
fn run_without_terminal_requires_answers() {
    let home = TempDir::new().unwrap();
    questionnaire(&home)
        .arg("run")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--answers"));
}
