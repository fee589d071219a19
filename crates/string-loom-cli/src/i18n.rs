// crates/string-loom-cli/src/i18n.rs
// ============================================================================
// Module: CLI Message Catalog
// Description: Centralized user-facing strings for the String Loom CLI.
// Purpose: Route all runtime output through one catalog for consistency.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! The String Loom CLI stores user-facing strings in a small message catalog
//! to enforce consistent messaging and to prepare for future locales. All
//! runtime output should be routed through the [`t!`](crate::t) macro.
//!
//! ## Invariants
//! - The catalog is initialized once and read-only thereafter.
//! - Missing keys fall back to the key itself.
//! - Placeholder substitutions preserve deterministic order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// A formatted message argument captured by the [`macro@crate::t`] macro.
///
/// # Invariants
/// - `key` matches a placeholder name without braces (for example, `path`).
/// - `value` is preformatted and should be safe for display.
#[derive(Clone)]
pub struct MessageArg {
    /// The placeholder name used in message templates (e.g., `"path"`).
    pub key: &'static str,
    /// The formatted string value to substitute for this placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// English catalog entries for every CLI message.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "string-loom {version}"),
    ("main.help_failed", "Failed to render help: {error}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    (
        "input.read_too_large",
        "Refusing to read {kind} at {path} because it is {size} bytes (limit {limit}).",
    ),
    ("input.read_failed", "Failed to read {kind} at {path}: {error}"),
    ("input.not_utf8", "Refusing to read {kind} at {path}: file must be UTF-8 text."),
    ("input.kind.catalog", "catalog file"),
    ("input.kind.translations", "translations file"),
    ("input.kind.project", "project file"),
    ("catalog.parse_failed", "Failed to parse catalog at {path}: {error}"),
    ("context.render_failed", "Failed to render context JSON: {error}"),
    ("template.render_failed", "Failed to render template JSON: {error}"),
    ("translations.parse_failed", "Failed to parse translations at {path}: {error}"),
    ("merge.backup_saved", "Backup saved to {path}"),
    ("merge.backup_failed", "Failed to save backup to {path}: {error}"),
    ("merge.render_failed", "Failed to render catalog: {error}"),
    (
        "merge.write_failed_restored",
        "Failed to write catalog at {path} (restored from backup): {error}",
    ),
    (
        "merge.restore_failed",
        "Failed to restore backup {backup} after write failure: {error}",
    ),
    ("merge.key_missing", "WARN: key not in catalog, skipped: {key}"),
    ("merge.added", "Added {count} translations for '{lang}'"),
    ("merge.overwritten", "Overwritten {count} (replaced existing)"),
    ("merge.skipped_exists", "Skipped {count} (already translated)"),
    ("merge.skipped_missing", "Skipped {count} (key not found in catalog)"),
    ("merge.revert_hint", "To revert: cp {backup} {catalog}"),
    ("verify.line", "{status} {lang}: {count}/{total} ({percent}%)"),
    ("verify.missing_header", "Missing {count} translations for '{lang}':"),
    ("verify.missing_entry", "  {key}"),
    ("verify.all_translated", "All strings translated for '{lang}'"),
    ("region.added", "Added '{entry}' to knownRegions"),
    ("region.already_present", "'{lang}' already in knownRegions, nothing to do"),
    ("region.patch_failed", "Failed to update project at {path}: {error}"),
    ("region.write_failed", "Failed to write project at {path}: {error}"),
];

/// Returns the message catalog.
pub(crate) fn catalog() -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    CATALOG_MAP.get_or_init(|| CATALOG_EN.iter().copied().collect())
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Formats the message for `key` while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let template = catalog().get(key).copied().unwrap_or(key);
    if args.is_empty() {
        return template.to_string();
    }

    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a catalog message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
///
/// # Returns
///
/// A formatted [`String`] with placeholders substituted.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}
