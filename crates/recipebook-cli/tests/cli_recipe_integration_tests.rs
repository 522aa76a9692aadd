//! CLI integration tests
//!
//! Drive the `recipebook` binary end to end against a TempDir database and
//! check its JSON output.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

const OWNER: &str = "6f1c2a3e-9b7d-4c1e-8f20-1a2b3c4d5e6f";
const STRANGER: &str = "0b9e8d7c-6a5f-4e3d-9c2b-1a0f9e8d7c6b";

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_recipebook"))
        .current_dir(dir)
        .env_remove("RECIPEBOOK_DB")
        .env_remove("RECIPEBOOK_TRACE_ID")
        .env("RECIPEBOOK_LOG_PROFILE", "production")
        .env("RUST_LOG", "off")
        .args(["--db", dir.join("store.db").to_str().unwrap()])
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn json_of(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn write(dir: &Path, name: &str, body: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn test_cli_init_applies_migrations() {
    let temp_dir = TempDir::new().unwrap();

    let json = json_of(&run(temp_dir.path(), &["init"]));

    assert_eq!(json["migrations"][0], "001_initial_schema");
    assert!(temp_dir.path().join("store.db").exists());
}

#[test]
fn test_cli_update_records_revisions() {
    // Given a recipe created through the CLI
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    let create = write(
        dir,
        "create.json",
        r#"{"title":"Omelette","ingredients":[{"ingredientName":"Egg","quantity":"2","unit":"PIECE"}],"steps":[{"stepNumber":1,"instruction":"Beat the eggs"}]}"#,
    );
    let created = json_of(&run(dir, &["recipe", "create", "--caller", OWNER, "--file", &create]));
    let recipe_id = created["recipeId"].as_i64().unwrap().to_string();
    let egg_id = created["ingredients"][0]["ingredientId"].as_i64().unwrap();

    // When the owner changes the egg count and drops the step
    let update = write(
        dir,
        "update.json",
        &format!(
            r#"{{"ingredients":[{{"ingredientId":{egg_id},"quantity":"3","unit":"PIECE"}}],"steps":[]}}"#
        ),
    );
    let updated = json_of(&run(
        dir,
        &["recipe", "update", &recipe_id, "--caller", OWNER, "--file", &update],
    ));

    // Then the update reports one ingredient UPDATE and one step DELETE
    let revisions = updated["revisions"].as_array().unwrap();
    assert_eq!(revisions.len(), 2);
    assert_eq!(revisions[0]["changeType"], "UPDATE");
    assert_eq!(revisions[1]["changeType"], "DELETE");

    // And the history queries agree
    let history = json_of(&run(dir, &["revisions", "list", &recipe_id, "--caller", OWNER]));
    assert_eq!(history["totalCount"], 2);

    let egg = json_of(&run(
        dir,
        &[
            "revisions",
            "ingredient",
            &recipe_id,
            &egg_id.to_string(),
            "--caller",
            OWNER,
        ],
    ));
    assert_eq!(egg["totalCount"], 1);
}

#[test]
fn test_cli_reports_access_denied() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    let create = write(dir, "create.json", r#"{"title":"Tea"}"#);
    let created = json_of(&run(dir, &["recipe", "create", "--caller", OWNER, "--file", &create]));
    let recipe_id = created["recipeId"].as_i64().unwrap().to_string();

    let output = run(
        dir,
        &[
            "recipe",
            "delete",
            &recipe_id,
            "--caller",
            STRANGER,
            "--trace-id",
            "trace-cli-1",
        ],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERR_ACCESS_DENIED"), "stderr: {stderr}");
    assert_eq!(stderr.matches("(request_id: ").count(), 1, "stderr: {stderr}");
    assert!(stderr.contains("(trace_id: trace-cli-1)"), "stderr: {stderr}");

    let still_there = json_of(&run(dir, &["recipe", "get", &recipe_id]));
    assert_eq!(still_there["title"], "Tea");
}
