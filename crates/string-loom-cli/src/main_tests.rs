// crates/string-loom-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for input handling and merge persistence.
// Purpose: Ensure bounded reads fail closed and merge snapshots protect data.
// Dependencies: string-loom-cli main helpers, tempfile
// ============================================================================

//! ## Overview
//! Validates `read_bytes_with_limit` size enforcement, snapshot path
//! construction, and the merge command's write/backup behavior against real
//! temporary files.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use super::MergeCommand;
use super::ReadLimitError;
use super::RegionAddCommand;
use super::backup_path;
use super::command_merge;
use super::command_region_add;
use super::quoted_key;
use super::read_bytes_with_limit;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Minimal catalog with one English-only key.
const CATALOG_TEXT: &str = r#"{
  "sourceLanguage" : "en",
  "strings" : {
    "Save" : {
      "localizations" : {
        "en" : {
          "stringUnit" : {
            "state" : "translated",
            "value" : "Save"
          }
        }
      }
    }
  },
  "version" : "1.0"
}"#;

/// Project text with a bare knownRegions entry.
const PROJECT_TEXT: &str = "objects = {\n\t\t\tknownRegions = (\n\t\t\t\ten,\n\t\t\t);\n};\n";

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture file");
    path
}

// ============================================================================
// SECTION: Bounded Reads
// ============================================================================

#[test]
fn read_bytes_with_limit_rejects_oversized_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_file(dir.path(), "big.json", &"x".repeat(64));
    let result = read_bytes_with_limit(&path, 16);
    match result {
        Err(ReadLimitError::TooLarge {
            size,
            limit,
        }) => {
            assert_eq!(size, 64);
            assert_eq!(limit, 16);
        }
        other => panic!("expected TooLarge, got {other:?}"),
    }
}

#[test]
fn read_bytes_with_limit_accepts_file_at_limit() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_file(dir.path(), "ok.json", &"x".repeat(16));
    let bytes = read_bytes_with_limit(&path, 16).expect("read at limit");
    assert_eq!(bytes.len(), 16);
}

// ============================================================================
// SECTION: Snapshot Path
// ============================================================================

#[test]
fn backup_path_appends_suffix_to_file_name() {
    let path = backup_path(Path::new("/tmp/l10n/Localizable.xcstrings"));
    assert_eq!(path, PathBuf::from("/tmp/l10n/Localizable.xcstrings.backup"));
}

// ============================================================================
// SECTION: Merge Command
// ============================================================================

#[test]
fn merge_writes_catalog_and_snapshot() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let catalog = write_file(dir.path(), "Localizable.xcstrings", CATALOG_TEXT);
    let translations = write_file(dir.path(), "ru.json", "{\"Save\": \"Сохранить\"}");

    let command = MergeCommand {
        catalog: catalog.clone(),
        lang: "ru".to_string(),
        translations,
        overwrite: false,
    };
    assert!(command_merge(&command).is_ok());

    let written = fs::read_to_string(&catalog).expect("read merged catalog");
    assert!(written.contains("\"ru\" : {"));
    assert!(written.contains("Сохранить"));
    assert!(!written.contains("\\u0421"), "non-ASCII must not be escaped");

    let snapshot = backup_path(&catalog);
    let backup = fs::read_to_string(snapshot).expect("read snapshot");
    assert_eq!(backup, CATALOG_TEXT);
}

#[test]
fn merge_without_overwrite_preserves_existing_translation() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let catalog = write_file(dir.path(), "Localizable.xcstrings", CATALOG_TEXT);
    let first = write_file(dir.path(), "first.json", "{\"Save\": \"Сохранить\"}");
    let second = write_file(dir.path(), "second.json", "{\"Save\": \"Записать\"}");

    let mut command = MergeCommand {
        catalog: catalog.clone(),
        lang: "ru".to_string(),
        translations: first,
        overwrite: false,
    };
    assert!(command_merge(&command).is_ok());
    command.translations = second;
    assert!(command_merge(&command).is_ok());

    let written = fs::read_to_string(&catalog).expect("read merged catalog");
    assert!(written.contains("Сохранить"));
    assert!(!written.contains("Записать"));
}

#[test]
fn merge_reports_error_for_missing_catalog_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let translations = write_file(dir.path(), "ru.json", "{}");
    let command = MergeCommand {
        catalog: dir.path().join("absent.xcstrings"),
        lang: "ru".to_string(),
        translations,
        overwrite: false,
    };
    assert!(command_merge(&command).is_err());
}

// ============================================================================
// SECTION: Region Command
// ============================================================================

#[test]
fn region_add_is_idempotent_on_disk() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let project = write_file(dir.path(), "project.pbxproj", PROJECT_TEXT);

    let command = RegionAddCommand {
        project: project.clone(),
        lang: "pt-BR".to_string(),
    };
    assert!(command_region_add(&command).is_ok());
    let once = fs::read_to_string(&project).expect("read patched project");
    assert!(once.contains("\"pt-BR\","));

    assert!(command_region_add(&command).is_ok());
    let twice = fs::read_to_string(&project).expect("read patched project");
    assert_eq!(once, twice);
}

// ============================================================================
// SECTION: Display Helpers
// ============================================================================

#[test]
fn quoted_key_escapes_embedded_newlines() {
    assert_eq!(quoted_key("Add\nPhoto"), "\"Add\\nPhoto\"");
}
