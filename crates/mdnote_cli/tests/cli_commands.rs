//! Integration tests for the mdnote commands

#![allow(deprecated)]

use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

mod common;
use common::{create, mdnote_cmd};

#[test]
fn list_empty_store() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("notes.db");

    mdnote_cmd(&db)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No articles found"));
}

#[test]
fn create_then_list_json_round_trips() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("notes.db");
    let id = create(&db, "T", "C");

    let output = mdnote_cmd(&db).args(["list", "--json"]).output().unwrap();
    assert!(output.status.success());

    let articles: Value = serde_json::from_slice(&output.stdout).unwrap();
    let articles = articles.as_array().unwrap();
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0]["id"], id);
    assert_eq!(articles[0]["title"], "T");
    assert_eq!(articles[0]["content"], "C");
    assert!(articles[0]["createdAt"].is_i64());
    assert!(articles[0]["updatedAt"].is_i64());
}

#[test]
fn create_reads_content_from_file() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("notes.db");
    let body = temp.path().join("body.md");
    fs::write(&body, "# From file\n").unwrap();

    let output = mdnote_cmd(&db)
        .args(["create", "--title", "f", "--file"])
        .arg(&body)
        .output()
        .unwrap();
    assert!(output.status.success());
    let id = String::from_utf8(output.stdout).unwrap().trim().to_string();

    mdnote_cmd(&db)
        .args(["show", &id])
        .assert()
        .success()
        .stdout("# From file\n");
}

#[test]
fn update_moves_article_to_front_and_marks_it() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("notes.db");
    let older = create(&db, "older", "v1");
    create(&db, "newer", "v1");

    mdnote_cmd(&db)
        .args(["update", &older.to_string(), "--title", "older", "--content", "v2"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Updated {older}")));

    let output = mdnote_cmd(&db).arg("list").output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let first = stdout.lines().next().unwrap();
    assert!(first.contains("older *"));

    mdnote_cmd(&db)
        .args(["show", &older.to_string()])
        .assert()
        .success()
        .stdout("v2");
}

#[test]
fn delete_removes_article_and_second_delete_is_not_found() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("notes.db");
    let id = create(&db, "gone", "");

    mdnote_cmd(&db)
        .args(["delete", &id.to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Deleted {id}")));

    mdnote_cmd(&db)
        .args(["delete", &id.to_string()])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("article not found"));

    mdnote_cmd(&db)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No articles found"));
}

#[test]
fn update_missing_article_is_not_found() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("notes.db");

    mdnote_cmd(&db)
        .args(["update", "7", "--title", "t", "--content", "c"])
        .assert()
        .code(3);
}

#[test]
fn show_html_renders_markdown() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("notes.db");
    let id = create(&db, "t", "# Hi");

    mdnote_cmd(&db)
        .args(["show", &id.to_string(), "--html", "--theme", "plain"])
        .assert()
        .success()
        .stdout("<h1>Hi</h1>\n");
}

#[test]
fn preview_reads_stdin() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("notes.db");

    mdnote_cmd(&db)
        .args(["preview", "--theme", "plain"])
        .write_stdin("`x`\n\n```\ncode\n```\n")
        .assert()
        .success()
        .stdout("<p><code>x</code></p>\n<pre><code>code\n</code></pre>\n");

    assert!(!db.exists());
}

#[test]
fn page_renders_editor_for_selected_article() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("notes.db");
    let id = create(&db, "Hello", "**b**");

    mdnote_cmd(&db)
        .args(["page", "--edit", &id.to_string(), "--locale", "en"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<html lang=\"en\">"))
        .stdout(predicate::str::contains("✨ Update"))
        .stdout(predicate::str::contains("<strong class=\"font-bold\">b</strong>"));
}

#[test]
fn page_with_unknown_article_is_not_found() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("notes.db");

    mdnote_cmd(&db).args(["page", "--edit", "5"]).assert().code(3);
}

#[test]
fn config_file_sets_presentation() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("notes.db");
    let config = temp.path().join("config.toml");
    fs::write(&config, "[presentation]\ntheme = \"plain\"\n").unwrap();

    mdnote_cmd(&db)
        .arg("--config")
        .arg(&config)
        .arg("preview")
        .write_stdin("# Hi")
        .assert()
        .success()
        .stdout("<h1>Hi</h1>\n");
}

#[test]
fn invalid_config_exits_with_config_code() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("notes.db");
    let config = temp.path().join("config.toml");
    fs::write(&config, "log_level = \"loud\"\n").unwrap();

    mdnote_cmd(&db)
        .arg("--config")
        .arg(&config)
        .arg("list")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("unsupported log level"));
}

#[test]
fn missing_content_is_a_usage_error() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("notes.db");

    mdnote_cmd(&db)
        .args(["create", "--title", "t"])
        .assert()
        .code(4);
}

#[test]
fn unreachable_store_exits_with_store_code() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("missing").join("notes.db");

    mdnote_cmd(&db).arg("list").assert().code(2);
}
