//! Integration tests for blogsearch
//!
//! These tests load a generator-shaped index from disk and exercise the
//! engine and the `bs` binary end to end.

use std::path::Path;
use std::sync::Arc;

use assert_cmd::Command;
use blogsearch::{FileLoader, IndexStore, QueryEngine, highlight, parse};
use predicates::prelude::*;
use tempfile::TempDir;

const INDEX: &str = r#"{
  "posts": [
    {
      "title": "Python Tutorial",
      "url": "/posts/python/tutorial.html",
      "date": "2024-05-02T09:00:00",
      "tags": ["python", "beginner"],
      "description": "Getting started",
      "relative_path": "python/tutorial"
    },
    {
      "title": "Reverse Engineering a Firmware Blob",
      "url": "/posts/re/firmware.html",
      "date": "2024-04-11T21:15:00",
      "tags": ["reverse-engineering", "embedded"],
      "description": "",
      "relative_path": "re/firmware"
    },
    {
      "title": "逆向工程笔记",
      "url": "/posts/re/notes.html",
      "date": "2024-03-08T12:00:00",
      "tags": ["逆向工程"],
      "relative_path": "re/notes"
    },
    {
      "title": "Building Web APIs in Python",
      "url": "/posts/python/web-api.html",
      "date": "2024-02-20T08:30:00",
      "tags": ["python", "web"],
      "description": "axum vs flask"
    },
    {
      "title": null,
      "url": "/posts/drafts/untitled.html",
      "date": "2024-01-01T00:00:00"
    }
  ],
  "generated_at": "2024-05-03T10:00:00",
  "total_posts": 5
}"#;

fn write_index(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("search-index.json");
    std::fs::write(&path, INDEX).expect("Failed to write index");
    path
}

async fn loaded_engine(dir: &Path) -> QueryEngine {
    let store = Arc::new(IndexStore::new());
    store
        .load_from(&FileLoader::new(write_index(dir)))
        .await
        .expect("Failed to load index");
    QueryEngine::new(store)
}

fn titles(engine: &QueryEngine, query: &str) -> Vec<String> {
    engine.search(query).into_iter().map(|p| p.title).collect()
}

// =============================================================================
// Engine over a loaded index
// =============================================================================

#[tokio::test]
async fn test_empty_query_lists_everything_in_order() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let engine = loaded_engine(temp.path()).await;

    let all = engine.search("");
    assert_eq!(all.len(), 5);
    assert_eq!(all, engine.search("   "));
    assert_eq!(all[0].title, "Python Tutorial");
    assert!(all[4].title.is_empty());
}

#[tokio::test]
async fn test_tag_and_keyword_queries() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let engine = loaded_engine(temp.path()).await;

    assert_eq!(
        titles(&engine, "python"),
        vec!["Python Tutorial", "Building Web APIs in Python"]
    );
    assert_eq!(titles(&engine, "#web python"), vec!["Building Web APIs in Python"]);
    assert_eq!(titles(&engine, "#rev"), vec!["Reverse Engineering a Firmware Blob"]);
    assert_eq!(titles(&engine, "#逆"), vec!["逆向工程笔记"]);
    assert!(titles(&engine, "#python firmware").is_empty());
}

#[tokio::test]
async fn test_reload_failure_keeps_index() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let engine = loaded_engine(temp.path()).await;

    let result = engine
        .store()
        .load_from(&FileLoader::new(temp.path().join("missing.json")))
        .await;

    assert!(result.is_err());
    assert_eq!(engine.search("").len(), 5);
}

#[tokio::test]
async fn test_highlight_search_keywords() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let engine = loaded_engine(temp.path()).await;

    let outcome = engine.run("#python web api");
    assert_eq!(outcome.posts.len(), 1);
    assert_eq!(
        highlight(&outcome.posts[0].title, &outcome.query.keywords),
        "Building <mark>Web</mark> <mark>API</mark>s in Python"
    );
    assert_eq!(parse("#python web api"), outcome.query);
}

// =============================================================================
// CLI
// =============================================================================

#[test]
fn test_cli_search_json() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let index = write_index(temp.path());

    Command::cargo_bin("bs")
        .expect("binary exists")
        .current_dir(temp.path())
        .env("NO_COLOR", "1")
        .arg("--index")
        .arg(&index)
        .args(["search", "--format", "json", "#python", "tutorial"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total\": 1"))
        .stdout(predicate::str::contains("<mark>Tutorial</mark>"));
}

#[test]
fn test_cli_search_no_match() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let index = write_index(temp.path());

    Command::cargo_bin("bs")
        .expect("binary exists")
        .current_dir(temp.path())
        .env("NO_COLOR", "1")
        .arg("--index")
        .arg(&index)
        .env_remove("RUST_LOG")
        .args(["search", "haskell"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No posts match \"haskell\""))
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_cli_parse() {
    let temp = TempDir::new().expect("Failed to create temp dir");

    Command::cargo_bin("bs")
        .expect("binary exists")
        .current_dir(temp.path())
        .args(["parse", "#web", "#python", "api"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"web\""))
        .stdout(predicate::str::contains("\"api\""));
}

#[test]
fn test_cli_missing_index_fails() {
    let temp = TempDir::new().expect("Failed to create temp dir");

    Command::cargo_bin("bs")
        .expect("binary exists")
        .current_dir(temp.path())
        .arg("--index")
        .arg(temp.path().join("missing.json"))
        .args(["search", "rust"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load search index"));
}
