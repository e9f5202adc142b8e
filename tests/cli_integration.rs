//! CLI integration tests for stack
//!
//! These tests run the binary against documents in temporary directories
//! and check both the printed output and what ends up on disk.

use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const WORK: &str = "\
# Work

## Task C [c1]

Do the third thing.

Dependent On: [b1] [a1]

## Task B [b1]

Do the second thing.

Dependent On: [a1]

## Task A [a1]

Do the first thing.
";

/// Get a command instance for the stack binary, isolated from user config
fn stack_cmd(dir: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("stack"));
    cmd.current_dir(dir)
        .env_remove("STACK_FILE")
        .env("XDG_CONFIG_HOME", dir.join(".config"));
    cmd
}

/// Create a temporary directory containing a `.stack` document
fn setup(content: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".stack"), content).unwrap();
    dir
}

// =============================================================================
// Init
// =============================================================================

#[test]
fn test_init_creates_document() {
    let dir = TempDir::new().unwrap();

    stack_cmd(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized stack"));

    assert_eq!(
        fs::read_to_string(dir.path().join(".stack")).unwrap(),
        "# Backlog\n\n"
    );
}

#[test]
fn test_init_is_idempotent() {
    let dir = setup(WORK);

    stack_cmd(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    assert_eq!(fs::read_to_string(dir.path().join(".stack")).unwrap(), WORK);
}

#[test]
fn test_init_with_explicit_file() {
    let dir = TempDir::new().unwrap();

    stack_cmd(dir.path())
        .args(["--file", "todo.txt", "init"])
        .assert()
        .success();

    assert!(dir.path().join("todo.txt").is_file());
    assert!(!dir.path().join(".stack").exists());
}

// =============================================================================
// Sort
// =============================================================================

#[test]
fn test_sort_prints_least_dependent_first() {
    let dir = setup(WORK);

    let out = stack_cmd(dir.path()).arg("sort").output().unwrap();
    assert!(out.status.success());

    let stdout = String::from_utf8(out.stdout).unwrap();
    let a = stdout.find("## Task A [a1]").unwrap();
    let b = stdout.find("## Task B [b1]").unwrap();
    let c = stdout.find("## Task C [c1]").unwrap();
    assert!(a < b && b < c, "unexpected order:\n{}", stdout);

    // Without --write the file is untouched
    assert_eq!(fs::read_to_string(dir.path().join(".stack")).unwrap(), WORK);
}

#[test]
fn test_sort_write_rewrites_file() {
    let dir = setup(WORK);

    stack_cmd(dir.path())
        .args(["sort", "--write"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sorted 3 entries"));

    let content = fs::read_to_string(dir.path().join(".stack")).unwrap();
    assert!(content.starts_with("# Work\n\n## Task A [a1]\n\nDo the first thing.\n\n## Task B [b1]"));
    assert!(content.contains("Dependent On: [b1] [a1]\n"));
}

#[test]
fn test_sort_json_reports_weights() {
    let dir = setup(WORK);

    let out = stack_cmd(dir.path())
        .args(["--format", "json", "sort"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let entries = json[0]["entries"].as_array().unwrap();
    let weights: Vec<_> = entries
        .iter()
        .map(|e| (e["id"].as_str().unwrap(), e["weight"].as_u64().unwrap()))
        .collect();

    assert_eq!(json[0]["section"], "Work");
    assert_eq!(weights, vec![("a1", 0), ("b1", 1), ("c1", 2)]);
}

#[test]
fn test_sort_finds_document_in_parent() {
    let dir = setup(WORK);
    let sub = dir.path().join("nested").join("deeper");
    fs::create_dir_all(&sub).unwrap();

    stack_cmd(&sub)
        .arg("sort")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Work"));
}

#[test]
fn test_sort_without_document_fails() {
    let dir = TempDir::new().unwrap();

    stack_cmd(dir.path())
        .arg("sort")
        .assert()
        .failure()
        .stderr(predicate::str::contains("stack init"));
}

#[test]
fn test_sort_unreadable_document_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".stack"), [0xffu8, 0xfe, 0x00]).unwrap();

    stack_cmd(dir.path())
        .arg("sort")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read document"));
}

#[test]
fn test_sort_tolerates_cycles() {
    let dir = setup("# Loop\n\n## A [a]\n\nDependent On: [b]\n\n## B [b]\n\nDependent On: [a]\n\n## C [c]\n");

    let out = stack_cmd(dir.path()).arg("sort").output().unwrap();
    assert!(out.status.success());

    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.find("[c]").unwrap() < stdout.find("## A [a]").unwrap());
}

// =============================================================================
// Fmt
// =============================================================================

#[test]
fn test_fmt_write_fills_missing_ids() {
    let dir = setup("# Work\n\n## Needs an id\n\nSome text\n");

    stack_cmd(dir.path())
        .args(["fmt", "--write"])
        .assert()
        .success();

    let content = fs::read_to_string(dir.path().join(".stack")).unwrap();
    let header = content.lines().find(|l| l.starts_with("## ")).unwrap();
    let id = header
        .strip_prefix("## Needs an id [")
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap();
    assert_eq!(id.len(), 8);
}

#[test]
fn test_fmt_keeps_document_order() {
    let dir = setup(WORK);

    let out = stack_cmd(dir.path()).arg("fmt").output().unwrap();
    let stdout = String::from_utf8(out.stdout).unwrap();

    assert!(stdout.find("[c1]").unwrap() < stdout.find("## Task A").unwrap());
}

// =============================================================================
// Queries
// =============================================================================

#[test]
fn test_list_shows_weights() {
    let dir = setup(WORK);

    stack_cmd(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Work (3):"))
        .stdout(predicate::str::is_match(r"c1\s+2\s+Task C").unwrap());
}

#[test]
fn test_list_unknown_section_fails() {
    let dir = setup(WORK);

    stack_cmd(dir.path())
        .args(["list", "--section", "Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Section not found: Nope"));
}

#[test]
fn test_list_json_filters_section() {
    let dir = setup("# One\n\n## A [a]\n\n# Two\n\n## B [b]\n\nDependent On: [a]\n");

    let out = stack_cmd(dir.path())
        .args(["-f", "json", "list", "--section", "Two"])
        .output()
        .unwrap();

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], "b");
    assert_eq!(items[0]["section"], "Two");
    assert_eq!(items[0]["dependencies"], serde_json::json!(["a"]));
}

#[test]
fn test_show_entry() {
    let dir = setup(WORK);

    stack_cmd(dir.path())
        .args(["show", "c1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task C [c1]"))
        .stdout(predicate::str::contains("Weight:  2"))
        .stdout(predicate::str::contains("Depends on: b1, a1"));
}

#[test]
fn test_show_unknown_entry_fails() {
    let dir = setup(WORK);

    stack_cmd(dir.path())
        .args(["show", "zzz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Entry not found: zzz"));
}

#[test]
fn test_cycles_reported() {
    let dir = setup("# Loop\n\n## A [a]\n\nDependent On: [b]\n\n## B [b]\n\nDependent On: [a]\n");

    stack_cmd(dir.path())
        .arg("cycles")
        .assert()
        .success()
        .stdout(predicate::str::contains("a -> b -> a"));
}

#[test]
fn test_cycles_follow_dependency_direction() {
    let dir = setup("# Ring\n\n## A [a]\n\nDependent On: [c]\n\n## B [b]\n\nDependent On: [a]\n\n## C [c]\n\nDependent On: [b]\n");

    stack_cmd(dir.path())
        .arg("cycles")
        .assert()
        .success()
        .stdout(predicate::str::contains("a -> c -> b -> a"));
}

#[test]
fn test_cycles_json_lists_walks() {
    let dir = setup("# Ring\n\n## A [a]\n\nDependent On: [c]\n\n## B [b]\n\nDependent On: [a]\n\n## C [c]\n\nDependent On: [b]\n");

    let out = stack_cmd(dir.path())
        .args(["--format", "json", "cycles"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let stdout = String::from_utf8(out.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 1);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json, serde_json::json!([["a", "c", "b"]]));
}

#[test]
fn test_text_format_prints_no_json() {
    let dir = setup(WORK);

    stack_cmd(dir.path())
        .args(["--format", "text", "list"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Work (3):"));
}

#[test]
fn test_no_cycles() {
    let dir = setup(WORK);

    stack_cmd(dir.path())
        .arg("cycles")
        .assert()
        .success()
        .stdout(predicate::str::contains("No dependency cycles."));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let dir = setup(WORK);

    stack_cmd(dir.path())
        .args(["--verbose", "list"])
        .assert()
        .success()
        .stderr(predicate::str::contains("[verbose:list]"));
}

#[test]
fn test_stack_file_env_overrides_discovery() {
    let dir = setup("# Ignored\n");
    fs::write(dir.path().join("other.txt"), WORK).unwrap();

    stack_cmd(dir.path())
        .env("STACK_FILE", dir.path().join("other.txt"))
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Work (3):"));
}
