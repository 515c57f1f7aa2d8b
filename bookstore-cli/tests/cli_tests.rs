//! Integration tests for the bookstore CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get the bookstore binary
#[allow(deprecated)]
fn bookstore_cmd() -> Command {
    let mut cmd = Command::cargo_bin("bookstore").unwrap();
    cmd.env_remove("BOOKSTORE_MONGODB_URI");
    cmd
}

#[test]
fn test_help_command() {
    bookstore_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bookstore"))
        .stdout(predicate::str::contains("Usage: bookstore"))
        .stdout(predicate::str::contains("demo"))
        .stdout(predicate::str::contains("seed"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("--uri"));
}

#[test]
fn test_version_command() {
    bookstore_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("Version"))
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_version_flag() {
    bookstore_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bookstore 0.1.0"));
}

#[test]
fn test_demo_help() {
    bookstore_cmd()
        .args(["demo", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Run the query walkthrough"))
        .stdout(predicate::str::contains("--section"))
        .stdout(predicate::str::contains("aggregation"))
        .stdout(predicate::str::contains("indexing"));
}

#[test]
fn test_seed_help() {
    bookstore_cmd()
        .args(["seed", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Load books into the collection"))
        .stdout(predicate::str::contains("--file"))
        .stdout(predicate::str::contains("--drop"));
}

#[test]
fn test_invalid_command() {
    bookstore_cmd()
        .arg("shard")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_invalid_section() {
    bookstore_cmd()
        .args(["demo", "--section", "sharding"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_seed_missing_file_fails_before_connecting() {
    let temp_dir = TempDir::new().unwrap();

    bookstore_cmd()
        .current_dir(temp_dir.path())
        .args(["seed", "--file", "nope.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Seed file not found"));
}

#[test]
fn test_seed_malformed_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("books.json"), "{ not json").unwrap();

    bookstore_cmd()
        .current_dir(temp_dir.path())
        .args(["seed", "--file", "books.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Seed error"));
}

#[test]
fn test_seed_empty_array_inserts_nothing() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("books.json"), "[]").unwrap();

    bookstore_cmd()
        .current_dir(temp_dir.path())
        .args(["seed", "--file", "books.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to insert"));
}

#[test]
fn test_demo_rejects_broken_config() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("bookstore.toml"), "[database\nuri =").unwrap();

    bookstore_cmd()
        .current_dir(temp_dir.path())
        .arg("demo")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_seed_honours_config_flag() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.toml");
    fs::write(&path, "[database\nuri =").unwrap();

    bookstore_cmd()
        .current_dir(temp_dir.path())
        .args(["--collection", "novels", "seed", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_init_writes_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("custom.toml");

    bookstore_cmd()
        .args(["init", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("[database]"));
    assert!(content.contains("plp_bookstore"));
    assert!(content.contains("[demo]"));
}

#[test]
fn test_init_force_overwrites() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bookstore.toml");
    fs::write(&path, "# stale").unwrap();

    bookstore_cmd()
        .current_dir(temp_dir.path())
        .args(["init", "--force"])
        .assert()
        .success();

    let content = fs::read_to_string(&path).unwrap();
    assert!(!content.contains("# stale"));
    assert!(content.contains("collection = \"books\""));
}
