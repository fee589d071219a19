// crates/string-loom-core/src/engine/context.rs
// ============================================================================
// Module: Context Extraction
// Description: Key context projection and integer-placeholder detection.
// Purpose: Tell an external translator which keys exist and what they mean.
// Dependencies: crate::catalog, regex, serde
// ============================================================================

//! ## Overview
//! Extract-context projects the catalog into a sorted map of key to English
//! text, optional comment, and a plural-need flag. The flag is a textual
//! pattern match for printf-style integer conversion specifiers, not a
//! format-string parser: positional prefixes and length modifiers are
//! recognized, nothing else is interpreted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::catalog::CatalogEntry;
use crate::catalog::SOURCE_LANGUAGE;
use crate::catalog::value::LocalizedValue;
use crate::catalog::value::UNIT_MARKER;

// ============================================================================
// SECTION: Placeholder Detection
// ============================================================================

/// Printf-style integer conversion specifier, with optional positional index
/// and length modifiers (`%d`, `%lld`, `%1$d`, `%2$lld`, ...).
const INT_SPECIFIER_PATTERN: &str = r"%(\d+\$)?l?l?d";

/// Returns the compiled integer-specifier pattern.
fn int_specifier() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(INT_SPECIFIER_PATTERN).ok()).as_ref()
}

/// Returns true when the text contains an integer format placeholder.
#[must_use]
pub fn needs_plural(text: &str) -> bool {
    int_specifier().is_some_and(|pattern| pattern.is_match(text))
}

// ============================================================================
// SECTION: Source Text Resolution
// ============================================================================

/// Resolves the English text for an entry: the top-level string unit of the
/// English localization when present, else the key itself.
#[must_use]
pub fn source_text(entry: &CatalogEntry, key: &str) -> String {
    if let Some(LocalizedValue::Group(members)) = entry.localizations.get(SOURCE_LANGUAGE)
        && let Some(LocalizedValue::Unit(unit)) = members.get(UNIT_MARKER)
    {
        return unit.text.clone();
    }
    key.to_string()
}

// ============================================================================
// SECTION: Context Projection
// ============================================================================

/// Translator-facing context for one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextEntry {
    /// Resolved English text (or the key itself when no English
    /// localization exists).
    pub en: String,
    /// Pass-through comment, when the entry carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Present and true when the English text needs plural handling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub needs_plural: Option<bool>,
}

/// Projects the catalog into sorted per-key context.
#[must_use]
pub fn extract_context(catalog: &Catalog) -> BTreeMap<String, ContextEntry> {
    catalog
        .strings
        .iter()
        .map(|(key, entry)| {
            let en = source_text(entry, key);
            let context = ContextEntry {
                comment: entry.comment.clone(),
                needs_plural: needs_plural(&en).then_some(true),
                en,
            };
            (key.clone(), context)
        })
        .collect()
}
