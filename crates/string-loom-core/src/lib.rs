// crates/string-loom-core/src/lib.rs
// ============================================================================
// Module: String Loom Core Library
// Description: Localization catalog model and transformation engine.
// Purpose: Expose the catalog engine operations behind a stable crate root.
// Dependencies: regex, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! String Loom Core is the catalog transformation engine: the recursive
//! localization value model, the fixed plural category table, the shape
//! transformer, the coverage classifier, the four public operations
//! (extract-context, generate-template, merge-translations, and
//! verify-coverage), and the byte-stable catalog serializer.
//!
//! The engine is deliberately I/O-free: collaborators read the catalog file,
//! hand the engine an in-memory catalog, and persist the result. One
//! operation runs per invocation against one catalog; access serialization
//! across processes is the collaborator's concern.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod catalog;
pub mod engine;
pub mod format;
pub mod plural;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use catalog::Catalog;
pub use catalog::CatalogEntry;
pub use catalog::CatalogError;
pub use catalog::SOURCE_LANGUAGE;
pub use catalog::value::LocalizedValue;
pub use catalog::value::Members;
pub use catalog::value::PLURAL_MARKER;
pub use catalog::value::StringUnit;
pub use catalog::value::TRANSLATED_STATE;
pub use catalog::value::UNIT_MARKER;
pub use catalog::value::VARIATIONS_MARKER;
pub use engine::context::ContextEntry;
pub use engine::context::extract_context;
pub use engine::context::needs_plural;
pub use engine::context::source_text;
pub use engine::coverage::CoverageStatus;
pub use engine::coverage::LanguageCoverage;
pub use engine::coverage::is_translated;
pub use engine::coverage::missing_keys;
pub use engine::coverage::verify_coverage;
pub use engine::merge::MergeReport;
pub use engine::merge::MergeValue;
pub use engine::merge::merge_translations;
pub use engine::merge::translations_from_json;
pub use engine::shape::blank;
pub use engine::shape::rekey_plurals;
pub use engine::template::generate_template;
pub use format::to_catalog_string;
pub use format::to_pretty_string;
pub use plural::DEFAULT_CATEGORIES;
pub use plural::categories_for;
pub use plural::is_declared_language;
