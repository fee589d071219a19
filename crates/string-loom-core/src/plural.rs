// crates/string-loom-core/src/plural.rs
// ============================================================================
// Module: Plural Category Table
// Description: Fixed CLDR plural-category sets per language code.
// Purpose: Centralize the category data driving template generation.
// Dependencies: none
// ============================================================================

//! ## Overview
//! A static mapping from language code to its applicable CLDR plural
//! category names. This is a deliberate design simplification: the tool
//! carries a fixed lookup table rather than evaluating CLDR plural rules
//! against numeric operands. Unknown codes fall back to a conservative
//! two-category set.
//!
//! ## Invariants
//! - Lookup is a case-sensitive exact match; `pt-BR` and `pt` are distinct.
//! - Category order within a set is stable across releases.

// ============================================================================
// SECTION: Category Data
// ============================================================================

/// Fallback category set for language codes not in the table.
pub const DEFAULT_CATEGORIES: &[&str] = &["one", "other"];

/// Declared plural category sets by language code.
///
/// # Invariants
/// - Entries are sorted by language code.
/// - Every set ends with `other`.
const CATEGORY_TABLE: &[(&str, &[&str])] = &[
    ("ar", &["zero", "one", "two", "few", "many", "other"]),
    ("cs", &["one", "few", "many", "other"]),
    ("da", &["one", "other"]),
    ("de", &["one", "other"]),
    ("el", &["one", "other"]),
    ("en", &["one", "other"]),
    ("es", &["one", "many", "other"]),
    ("fi", &["one", "other"]),
    ("fr", &["one", "many", "other"]),
    ("he", &["one", "two", "other"]),
    ("hi", &["one", "other"]),
    ("id", &["other"]),
    ("it", &["one", "many", "other"]),
    ("ja", &["other"]),
    ("ko", &["other"]),
    ("nb", &["one", "other"]),
    ("nl", &["one", "other"]),
    ("pl", &["one", "few", "many", "other"]),
    ("pt-BR", &["one", "many", "other"]),
    ("ru", &["one", "few", "many", "other"]),
    ("sv", &["one", "other"]),
    ("th", &["other"]),
    ("tr", &["one", "other"]),
    ("uk", &["one", "few", "many", "other"]),
    ("vi", &["other"]),
    ("zh-Hans", &["other"]),
    ("zh-Hant", &["other"]),
];

// ============================================================================
// SECTION: Lookup
// ============================================================================

/// Returns the declared plural category set for a language code.
///
/// Unknown codes get [`DEFAULT_CATEGORIES`]. There is no locale negotiation:
/// the match is case-sensitive and exact.
#[must_use]
pub fn categories_for(language: &str) -> &'static [&'static str] {
    CATEGORY_TABLE
        .iter()
        .find(|(code, _)| *code == language)
        .map_or(DEFAULT_CATEGORIES, |(_, categories)| categories)
}

/// Returns true when the language code has a declared category set.
#[must_use]
pub fn is_declared_language(language: &str) -> bool {
    CATEGORY_TABLE.iter().any(|(code, _)| *code == language)
}
