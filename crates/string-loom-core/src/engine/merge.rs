// crates/string-loom-core/src/engine/merge.rs
// ============================================================================
// Module: Translation Merge
// Description: Merge translated values into the catalog with count tracking.
// Purpose: Accept template round-trips and plain-string translations safely.
// Dependencies: crate::catalog, serde, serde_json
// ============================================================================

//! ## Overview
//! Merge accepts a mapping from key to either a plain string or an
//! already-structured localization value. Plain strings are wrapped as a
//! `translated` leaf unit at the boundary; structured values are stored
//! verbatim with no validation of their internal shape; callers are
//! responsible for supplying well-formed nesting (the template generator
//! produces exactly the accepted shape). Unknown keys are skipped and
//! counted, never fatal.
//!
//! ## Invariants
//! - `added + overwritten + skipped_exists + skipped_missing` equals the
//!   number of input entries after every merge.
//! - Without the overwrite flag, an existing key/language pair is never
//!   mutated, regardless of input value.
//! - Keys are never renamed or deleted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::catalog::Catalog;
use crate::catalog::CatalogError;
use crate::catalog::value::LocalizedValue;

// ============================================================================
// SECTION: Merge Input
// ============================================================================

/// One translation supplied to merge, resolved once at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum MergeValue {
    /// A plain string translation, to be wrapped as a translated unit.
    PlainText(String),
    /// An already-structured localization value, stored verbatim.
    Structured(LocalizedValue),
}

impl MergeValue {
    /// Resolves a raw JSON translation value into the boundary type.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(text) => Self::PlainText(text.clone()),
            other => Self::Structured(LocalizedValue::from_json(other)),
        }
    }

    /// Converts the boundary type into the canonical localization value.
    #[must_use]
    pub fn into_localized(self) -> LocalizedValue {
        match self {
            Self::PlainText(text) => LocalizedValue::translated_unit(text),
            Self::Structured(value) => value,
        }
    }
}

/// Parses a whole translations document into merge input.
///
/// # Errors
/// Returns [`CatalogError::TranslationsNotObject`] unless the root is a
/// JSON object of key-to-translation pairs.
pub fn translations_from_json(root: &Value) -> Result<BTreeMap<String, MergeValue>, CatalogError> {
    let members = root.as_object().ok_or(CatalogError::TranslationsNotObject)?;
    Ok(members
        .iter()
        .map(|(key, value)| (key.clone(), MergeValue::from_json(value)))
        .collect())
}

// ============================================================================
// SECTION: Merge Report
// ============================================================================

/// Outcome counters for one merge invocation.
///
/// # Invariants
/// - The four counters always sum to the number of input entries.
/// - `missing_keys` lists exactly the entries counted in `skipped_missing`,
///   sorted lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MergeReport {
    /// Translations stored for a previously missing language.
    pub added: usize,
    /// Translations that replaced an existing value under the overwrite
    /// flag.
    pub overwritten: usize,
    /// Entries skipped because the language already had a value and
    /// overwrite was not requested.
    pub skipped_exists: usize,
    /// Entries skipped because the key does not exist in the catalog.
    pub skipped_missing: usize,
    /// Keys of the entries counted in `skipped_missing`.
    pub missing_keys: Vec<String>,
}

// ============================================================================
// SECTION: Merge
// ============================================================================

/// Merges translations for one language into the catalog in place.
///
/// The catalog mutation is incremental; durability (snapshot before, restore
/// on failed write-back) is the persistence collaborator's responsibility.
pub fn merge_translations(
    catalog: &mut Catalog,
    language: &str,
    translations: &BTreeMap<String, MergeValue>,
    overwrite: bool,
) -> MergeReport {
    let mut report = MergeReport::default();
    for (key, value) in translations {
        let Some(entry) = catalog.strings.get_mut(key) else {
            report.skipped_missing += 1;
            report.missing_keys.push(key.clone());
            continue;
        };
        let exists = entry.localizations.contains_key(language);
        if exists && !overwrite {
            report.skipped_exists += 1;
            continue;
        }
        entry.localizations.insert(language.to_string(), value.clone().into_localized());
        if exists {
            report.overwritten += 1;
        } else {
            report.added += 1;
        }
    }
    report
}
