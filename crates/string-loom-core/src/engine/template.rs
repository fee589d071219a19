// crates/string-loom-core/src/engine/template.rs
// ============================================================================
// Module: Template Generation
// Description: Blank fill-in template generation for a target language.
// Purpose: Produce the exact structural shape merge expects to receive back.
// Dependencies: crate::catalog, crate::engine::{context, shape}, crate::plural
// ============================================================================

//! ## Overview
//! Template generation walks the catalog in key order and emits, for every
//! key not yet localized for the target language, a blank localization value
//! shaped after the English localization with plural categories re-keyed to
//! the target language. Keys without an English localization fall back to a
//! heuristic: a plural scaffold when the resolved text carries an integer
//! placeholder, else a single empty unit.
//!
//! ## Invariants
//! - Keys already localized for the target language are skipped entirely.
//! - Emitted plural containers are keyed exactly by the target language's
//!   declared category set.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::catalog::Catalog;
use crate::catalog::SOURCE_LANGUAGE;
use crate::catalog::value::LocalizedValue;
use crate::catalog::value::Members;
use crate::catalog::value::PLURAL_MARKER;
use crate::catalog::value::VARIATIONS_MARKER;
use crate::engine::context::needs_plural;
use crate::engine::context::source_text;
use crate::engine::shape::blank;
use crate::engine::shape::rekey_plurals;
use crate::plural::categories_for;

// ============================================================================
// SECTION: Template Generation
// ============================================================================

/// Generates a sorted fill-in template for the target language.
///
/// Each emitted value is what goes under the entry's localizations for that
/// language, in the exact shape [`crate::engine::merge::merge_translations`]
/// accepts back.
#[must_use]
pub fn generate_template(
    catalog: &Catalog,
    language: &str,
) -> BTreeMap<String, LocalizedValue> {
    let categories = categories_for(language);
    let mut template = BTreeMap::new();
    for (key, entry) in &catalog.strings {
        if entry.localizations.contains_key(language) {
            continue;
        }
        let value = if let Some(english) = entry.localizations.get(SOURCE_LANGUAGE) {
            rekey_plurals(&blank(english), categories)
        } else {
            fallback_value(&source_text(entry, key), categories)
        };
        template.insert(key.clone(), value);
    }
    template
}

// ============================================================================
// SECTION: Fallback Shapes
// ============================================================================

/// Synthesizes a template value for a key without an English localization.
fn fallback_value(resolved_text: &str, categories: &[&str]) -> LocalizedValue {
    if needs_plural(resolved_text) {
        plural_scaffold(categories)
    } else {
        LocalizedValue::translated_unit("")
    }
}

/// Builds a variations wrapper holding one empty unit per plural category.
fn plural_scaffold(categories: &[&str]) -> LocalizedValue {
    let plural: Members = categories
        .iter()
        .map(|category| ((*category).to_string(), LocalizedValue::translated_unit("")))
        .collect();
    let mut variations = Members::new();
    variations.insert(PLURAL_MARKER.to_string(), LocalizedValue::Plural(plural));
    let mut root = Members::new();
    root.insert(VARIATIONS_MARKER.to_string(), LocalizedValue::Group(variations));
    LocalizedValue::Group(root)
}
