// crates/string-loom-core/src/catalog/mod.rs
// ============================================================================
// Module: Localization Catalog Model
// Description: Catalog and catalog-entry types plus fail-closed parsing.
// Purpose: Hold the whole catalog in memory with deterministic ordering.
// Dependencies: crate::catalog::value, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The catalog is an ordered-by-key mapping from string key to a catalog
//! entry, read whole into memory and transformed in place by one engine
//! operation per invocation. Parsing is strict about the pieces the engine
//! interprets (`strings`, `comment`, `localizations`) and preserves every
//! other field verbatim for round-trip fidelity with the consuming
//! toolchain.
//!
//! ## Invariants
//! - Keys are unique, immutable once created, and iterate lexicographically.
//! - Within an entry's localizations, at most one value exists per language.
//! - Unrecognized top-level and entry-level fields survive a parse/serialize
//!   round trip byte-for-byte.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod value;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use crate::catalog::value::LocalizedValue;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Language code of the structural template localization.
pub const SOURCE_LANGUAGE: &str = "en";

/// Top-level member holding the key-to-entry map.
const STRINGS_FIELD: &str = "strings";

/// Top-level member naming the development language.
const SOURCE_LANGUAGE_FIELD: &str = "sourceLanguage";

/// Top-level member holding the catalog format version.
const VERSION_FIELD: &str = "version";

/// Entry-level member holding the pass-through comment.
const COMMENT_FIELD: &str = "comment";

/// Entry-level member mapping language codes to localization values.
const LOCALIZATIONS_FIELD: &str = "localizations";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Catalog structural and serialization errors.
///
/// # Invariants
/// - Structural errors are detected up front, before any mutation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Input was not valid JSON.
    #[error("catalog is not valid json: {0}")]
    Json(String),
    /// The top level was not a JSON object.
    #[error("catalog root must be a json object")]
    RootNotObject,
    /// The catalog has no recognizable `strings` map.
    #[error("catalog has no strings map")]
    MissingStrings,
    /// A catalog entry did not match the expected shape.
    #[error("catalog entry {key} is malformed: {reason}")]
    MalformedEntry {
        /// Key of the offending entry.
        key: String,
        /// Human-readable description of the shape violation.
        reason: String,
    },
    /// Merge input was not a JSON object of key-to-translation pairs.
    #[error("translations input must be a json object")]
    TranslationsNotObject,
    /// Serialization of the catalog failed.
    #[error("catalog serialization failed: {0}")]
    Serialize(String),
}

// ============================================================================
// SECTION: Catalog Entry
// ============================================================================

/// One key's entry: a pass-through comment plus per-language localizations.
///
/// # Invariants
/// - `comment` is context for translators only; the engine never interprets
///   it beyond copying it into extract-context output.
/// - `extra` holds entry-level fields the engine does not interpret
///   (`extractionState` and future additions), preserved verbatim.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogEntry {
    /// Optional translator-facing comment.
    pub comment: Option<String>,
    /// Localization values keyed by language code.
    pub localizations: BTreeMap<String, LocalizedValue>,
    /// Uninterpreted entry-level fields, preserved verbatim.
    pub extra: BTreeMap<String, Value>,
}

impl CatalogEntry {
    /// Parses an entry from its JSON wire form.
    ///
    /// # Errors
    /// Returns [`CatalogError::MalformedEntry`] when the entry is not an
    /// object, the comment is not a string, or localizations is not an
    /// object.
    pub fn from_json(key: &str, value: &Value) -> Result<Self, CatalogError> {
        let members = value.as_object().ok_or_else(|| CatalogError::MalformedEntry {
            key: key.to_string(),
            reason: "entry must be a json object".to_string(),
        })?;

        let mut entry = Self::default();
        for (member_key, member_value) in members {
            match member_key.as_str() {
                COMMENT_FIELD => {
                    let comment =
                        member_value.as_str().ok_or_else(|| CatalogError::MalformedEntry {
                            key: key.to_string(),
                            reason: "comment must be a string".to_string(),
                        })?;
                    entry.comment = Some(comment.to_string());
                }
                LOCALIZATIONS_FIELD => {
                    let localizations =
                        member_value.as_object().ok_or_else(|| CatalogError::MalformedEntry {
                            key: key.to_string(),
                            reason: "localizations must be a json object".to_string(),
                        })?;
                    for (language, localized) in localizations {
                        entry
                            .localizations
                            .insert(language.clone(), LocalizedValue::from_json(localized));
                    }
                }
                _ => {
                    entry.extra.insert(member_key.clone(), member_value.clone());
                }
            }
        }
        Ok(entry)
    }

    /// Renders the entry back into its JSON wire form.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut members = Map::new();
        for (key, value) in &self.extra {
            members.insert(key.clone(), value.clone());
        }
        if let Some(comment) = &self.comment {
            members.insert(COMMENT_FIELD.to_string(), Value::String(comment.clone()));
        }
        if !self.localizations.is_empty() {
            let mut localizations = Map::new();
            for (language, localized) in &self.localizations {
                localizations.insert(language.clone(), localized.to_json());
            }
            members.insert(LOCALIZATIONS_FIELD.to_string(), Value::Object(localizations));
        }
        Value::Object(members)
    }
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// The full key-to-entry structure for an application's user-facing strings.
///
/// # Invariants
/// - `strings` iterates in lexicographic key order for deterministic output.
/// - The catalog is transformed in place and persisted all-or-nothing per
///   invocation; no entry is ever partially persisted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    /// Development language declared by the catalog, when present.
    pub source_language: Option<String>,
    /// Catalog format version, when present.
    pub version: Option<String>,
    /// Ordered key-to-entry map.
    pub strings: BTreeMap<String, CatalogEntry>,
    /// Uninterpreted top-level fields, preserved verbatim.
    pub extra: BTreeMap<String, Value>,
}

impl Catalog {
    /// Parses a catalog from its UTF-8 text serialization.
    ///
    /// # Errors
    /// Returns [`CatalogError::Json`] on malformed JSON,
    /// [`CatalogError::RootNotObject`] / [`CatalogError::MissingStrings`] on
    /// structural violations, and [`CatalogError::MalformedEntry`] when an
    /// individual entry has an unusable shape.
    pub fn parse_str(text: &str) -> Result<Self, CatalogError> {
        let root: Value =
            serde_json::from_str(text).map_err(|err| CatalogError::Json(err.to_string()))?;
        Self::from_json(&root)
    }

    /// Builds a catalog from an already-parsed JSON tree.
    ///
    /// # Errors
    /// Same taxonomy as [`Catalog::parse_str`].
    pub fn from_json(root: &Value) -> Result<Self, CatalogError> {
        let members = root.as_object().ok_or(CatalogError::RootNotObject)?;
        let strings_value = members.get(STRINGS_FIELD).ok_or(CatalogError::MissingStrings)?;
        let strings_members = strings_value.as_object().ok_or(CatalogError::MissingStrings)?;

        let mut catalog = Self::default();
        for (key, value) in strings_members {
            catalog.strings.insert(key.clone(), CatalogEntry::from_json(key, value)?);
        }
        for (member_key, member_value) in members {
            match member_key.as_str() {
                STRINGS_FIELD => {}
                SOURCE_LANGUAGE_FIELD if member_value.is_string() => {
                    catalog.source_language =
                        member_value.as_str().map(std::string::ToString::to_string);
                }
                VERSION_FIELD if member_value.is_string() => {
                    catalog.version = member_value.as_str().map(std::string::ToString::to_string);
                }
                _ => {
                    catalog.extra.insert(member_key.clone(), member_value.clone());
                }
            }
        }
        Ok(catalog)
    }

    /// Renders the catalog into its JSON tree, keys sorted throughout.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut root = Map::new();
        for (key, value) in &self.extra {
            root.insert(key.clone(), value.clone());
        }
        if let Some(language) = &self.source_language {
            root.insert(SOURCE_LANGUAGE_FIELD.to_string(), Value::String(language.clone()));
        }
        if let Some(version) = &self.version {
            root.insert(VERSION_FIELD.to_string(), Value::String(version.clone()));
        }
        let mut strings = Map::new();
        for (key, entry) in &self.strings {
            strings.insert(key.clone(), entry.to_json());
        }
        root.insert(STRINGS_FIELD.to_string(), Value::Object(strings));
        Value::Object(root)
    }
}
