// crates/string-loom-core/src/engine/coverage.rs
// ============================================================================
// Module: Coverage Classifier and Report
// Description: Presence classifier plus per-language coverage computation.
// Purpose: Answer which keys carry a translation attempt for each language.
// Dependencies: crate::catalog, serde
// ============================================================================

//! ## Overview
//! The classifier answers "does a translation attempt exist here": a value
//! counts as translated when it contains at least one leaf unit anywhere in
//! its structure. This is presence-based on purpose: an empty-text unit
//! still counts, matching the behavior of the toolchain this catalog format
//! belongs to. Coverage reporting aggregates the classifier over every
//! language code appearing anywhere in the catalog.
//!
//! ## Invariants
//! - Percentages use integer truncation; `99` is the exact OK threshold.
//! - Missing-key listings are sorted lexicographically.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::catalog::value::LocalizedValue;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Minimum truncated percentage that reports as OK.
const OK_THRESHOLD_PERCENT: usize = 99;

// ============================================================================
// SECTION: Classifier
// ============================================================================

/// Returns true when the value contains at least one leaf unit at any depth.
///
/// Presence of a unit is what counts, not whether its text is non-empty:
/// a blank unit signals a translation attempt and classifies as translated.
#[must_use]
pub fn is_translated(value: &LocalizedValue) -> bool {
    match value {
        LocalizedValue::Unit(_) => true,
        LocalizedValue::Plural(members) | LocalizedValue::Group(members) => {
            members.values().any(is_translated)
        }
        LocalizedValue::Scalar(_) => false,
    }
}

// ============================================================================
// SECTION: Report Types
// ============================================================================

/// Coverage status for one language.
///
/// # Invariants
/// - Labels are stable for report output and tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CoverageStatus {
    /// Coverage is at or above the OK threshold.
    Ok,
    /// Coverage is below the OK threshold.
    Warn,
}

impl CoverageStatus {
    /// Returns the canonical report label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warn => "WARN",
        }
    }
}

/// Coverage figures for one language.
///
/// # Invariants
/// - `translated <= total`.
/// - `percent == translated * 100 / total`, truncated, and `0` when the
///   catalog is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LanguageCoverage {
    /// Number of keys whose localization classifies as translated.
    pub translated: usize,
    /// Total number of keys in the catalog.
    pub total: usize,
    /// Truncated coverage percentage.
    pub percent: usize,
    /// OK/WARN classification of `percent`.
    pub status: CoverageStatus,
}

impl LanguageCoverage {
    /// Computes coverage figures from a translated count and a key total.
    #[must_use]
    pub fn from_counts(translated: usize, total: usize) -> Self {
        let percent = if total == 0 { 0 } else { translated * 100 / total };
        let status = if percent >= OK_THRESHOLD_PERCENT {
            CoverageStatus::Ok
        } else {
            CoverageStatus::Warn
        };
        Self {
            translated,
            total,
            percent,
            status,
        }
    }
}

// ============================================================================
// SECTION: Coverage Computation
// ============================================================================

/// Computes coverage for every language code appearing in the catalog.
///
/// Languages present in any entry's localizations are reported even when
/// none of their values classify as translated.
#[must_use]
pub fn verify_coverage(catalog: &Catalog) -> BTreeMap<String, LanguageCoverage> {
    let total = catalog.strings.len();
    let mut translated: BTreeMap<String, usize> = BTreeMap::new();
    for entry in catalog.strings.values() {
        for (language, value) in &entry.localizations {
            let count = translated.entry(language.clone()).or_insert(0);
            if is_translated(value) {
                *count += 1;
            }
        }
    }
    translated
        .into_iter()
        .map(|(language, count)| (language, LanguageCoverage::from_counts(count, total)))
        .collect()
}

/// Lists the keys whose localization for `language` is absent or fails the
/// classifier, sorted lexicographically.
#[must_use]
pub fn missing_keys(catalog: &Catalog, language: &str) -> Vec<String> {
    catalog
        .strings
        .iter()
        .filter(|(_, entry)| {
            entry.localizations.get(language).is_none_or(|value| !is_translated(value))
        })
        .map(|(key, _)| key.clone())
        .collect()
}
