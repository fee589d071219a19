// crates/string-loom-project/src/lib.rs
// ============================================================================
// Module: Project Region Registration
// Description: knownRegions block patching for Xcode project text.
// Purpose: Register a language code in project configuration idempotently.
// Dependencies: regex, thiserror
// ============================================================================

//! ## Overview
//! An Xcode project file carries a single `knownRegions = ( ... );` block
//! listing the language codes the project localizes into. Registration
//! parses the existing entries (quoted or bare, comma/whitespace separated)
//! and no-ops when the code is already present. Otherwise it appends the
//! code, quoted when it contains a hyphen, using indentation sniffed from
//! an existing entry. Only the block is rewritten; every other byte of the
//! project text is left identical.
//!
//! ## Invariants
//! - Registration is idempotent: applying it twice equals applying it once.
//! - A missing block is a structural error detected before any rewrite.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Matches the knownRegions block: opener, entry list, closer.
const KNOWN_REGIONS_PATTERN: &str = r"(?s)(knownRegions\s*=\s*\()([^)]*?)(\);)";

/// Matches one region entry, tolerating optional quoting.
const ENTRY_PATTERN: &str = r#"["']?([^"',\s]+)["']?"#;

/// Sniffs entry indentation from the first indented line in the block.
const INDENT_PATTERN: &str = r"\n(\s+)\w";

/// Indentation used when the block has no existing indented entry.
const FALLBACK_INDENT: &str = "\t\t\t\t";

/// Indentation of the closing parenthesis after a rewrite.
const CLOSER_INDENT: &str = "\t\t\t";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Project text structural errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProjectError {
    /// The project text has no recognizable knownRegions block.
    #[error("project text has no knownRegions block")]
    MissingKnownRegions,
}

// ============================================================================
// SECTION: Outcome
// ============================================================================

/// Result of a region registration.
///
/// # Invariants
/// - When `added` is false, `text` is byte-identical to the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionUpdate {
    /// Project text after registration.
    pub text: String,
    /// Entry as written into the block (quoted when hyphenated).
    pub entry: String,
    /// Whether the block was rewritten.
    pub added: bool,
}

// ============================================================================
// SECTION: Compiled Patterns
// ============================================================================

/// Returns the compiled knownRegions block pattern.
fn block_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(KNOWN_REGIONS_PATTERN).ok()).as_ref()
}

/// Returns the compiled entry pattern.
fn entry_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(ENTRY_PATTERN).ok()).as_ref()
}

/// Returns the compiled indentation-sniffing pattern.
fn indent_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(INDENT_PATTERN).ok()).as_ref()
}

// ============================================================================
// SECTION: Registration
// ============================================================================

/// Registers a language code in the project's knownRegions block.
///
/// # Errors
/// Returns [`ProjectError::MissingKnownRegions`] when no block is found;
/// the input text is not touched in that case.
pub fn register_region(project_text: &str, language: &str) -> Result<RegionUpdate, ProjectError> {
    let captures = block_pattern()
        .and_then(|pattern| pattern.captures(project_text))
        .ok_or(ProjectError::MissingKnownRegions)?;
    let block = captures.get(2).ok_or(ProjectError::MissingKnownRegions)?;

    let entry = if language.contains('-') {
        format!("\"{language}\"")
    } else {
        language.to_string()
    };

    if block_entries(block.as_str()).any(|existing| existing == language) {
        return Ok(RegionUpdate {
            text: project_text.to_string(),
            entry,
            added: false,
        });
    }

    let indent = sniff_indent(block.as_str());
    let rewritten_block =
        format!("{}\n{indent}{entry},\n{CLOSER_INDENT}", block.as_str().trim_end());
    let mut text = String::with_capacity(project_text.len() + rewritten_block.len());
    text.push_str(&project_text[..block.start()]);
    text.push_str(&rewritten_block);
    text.push_str(&project_text[block.end()..]);
    Ok(RegionUpdate {
        text,
        entry,
        added: true,
    })
}

/// Iterates the region codes already present in the block.
fn block_entries(block: &str) -> impl Iterator<Item = &str> {
    entry_pattern()
        .into_iter()
        .flat_map(|pattern| pattern.captures_iter(block))
        .filter_map(|captures| captures.get(1).map(|entry| entry.as_str()))
}

/// Sniffs the indentation of existing entries, with a tab fallback.
fn sniff_indent(block: &str) -> String {
    indent_pattern()
        .and_then(|pattern| pattern.captures(block))
        .and_then(|captures| captures.get(1))
        .map_or_else(|| FALLBACK_INDENT.to_string(), |indent| indent.as_str().to_string())
}
