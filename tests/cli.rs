//! Binary-level checks for commands that need no model access.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command with a clean environment in an empty working directory.
fn recipe(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("recipe-rs").unwrap_or_else(|e| unreachable!("{e}"));
    cmd.current_dir(dir.path())
        .env_remove("RECIPE_COOKWARE")
        .env_remove("OPENAI_API_KEY")
        .env_remove("RECIPE_API_KEY")
        .env_remove("RECIPE_PROMPT_DIR");
    cmd
}

fn workdir() -> TempDir {
    TempDir::new().unwrap_or_else(|e| unreachable!("{e}"))
}

#[test]
fn check_cookware_reports_missing_items() {
    let dir = workdir();
    recipe(&dir)
        .args(["check-cookware", "Spatula", "Blender"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Can cook: no"))
        .stdout(predicate::str::contains("Missing: Blender"));
}

#[test]
fn check_cookware_requires_items() {
    let dir = workdir();
    recipe(&dir).arg("check-cookware").assert().failure();
}

#[test]
fn cookware_lists_defaults() {
    let dir = workdir();
    recipe(&dir)
        .arg("cookware")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Available cookware (8):"))
        .stdout(predicate::str::contains("Ladle"));
}

#[test]
fn cookware_json_honours_environment() {
    let dir = workdir();
    recipe(&dir)
        .args(["--format", "json", "cookware"])
        .env("RECIPE_COOKWARE", "Wok, Cleaver")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Wok\""))
        .stdout(predicate::str::contains("\"count\": 2"));
}

#[test]
fn init_prompts_writes_templates() {
    let dir = workdir();
    let target = dir.path().join("custom");
    recipe(&dir)
        .args(["init-prompts", "--dir"])
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 4 prompt template(s)"));

    for file in ["system.md", "refusal.md", "classifier.md", "cookware.md"] {
        assert!(target.join(file).exists(), "{file} missing");
    }
}

#[test]
fn query_without_api_key_fails() {
    let dir = workdir();
    recipe(&dir)
        .args(["query", "How do I poach eggs?"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("API key missing"));
}
