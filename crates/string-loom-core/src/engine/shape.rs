// crates/string-loom-core/src/engine/shape.rs
// ============================================================================
// Module: Shape Transformer
// Description: Blank and plural re-key walks over localization values.
// Purpose: Build fill-in templates whose shape mirrors an existing value.
// Dependencies: crate::catalog::value, crate::plural
// ============================================================================

//! ## Overview
//! Two pure, shape-preserving transformations over a localization value:
//! blanking (empty every leaf's text, force its state to `translated`) and
//! plural re-keying (replace each plural variation set with one entry per
//! target category, cloned from an existing member's shape).
//!
//! ## Invariants
//! - Both walks return deep copies; inputs are never mutated.
//! - Container keys and nesting are preserved except at the exact points
//!   where plural categories change.
//! - Scalar metadata members are never rewritten.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::catalog::value::LocalizedValue;
use crate::catalog::value::Members;
use crate::catalog::value::StringUnit;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Preferred shape-template category when re-keying a plural set.
const TEMPLATE_CATEGORY: &str = "other";

// ============================================================================
// SECTION: Blank
// ============================================================================

/// Produces a deep copy with every leaf blanked.
///
/// Every unit's text becomes empty and its state is forced to `translated`;
/// all container structure is preserved unchanged. Non-unit scalars (numeric
/// or null metadata fields) are never coerced.
#[must_use]
pub fn blank(value: &LocalizedValue) -> LocalizedValue {
    match value {
        LocalizedValue::Unit(_) => LocalizedValue::Unit(StringUnit::translated("")),
        LocalizedValue::Plural(members) => LocalizedValue::Plural(blank_members(members)),
        LocalizedValue::Group(members) => LocalizedValue::Group(blank_members(members)),
        LocalizedValue::Scalar(scalar) => LocalizedValue::Scalar(scalar.clone()),
    }
}

/// Blanks each member of a container.
fn blank_members(members: &Members) -> Members {
    members.iter().map(|(key, member)| (key.clone(), blank(member))).collect()
}

// ============================================================================
// SECTION: Plural Re-key
// ============================================================================

/// Re-keys every plural variation set to the target category set.
///
/// One existing member is chosen as the shape template (the `other`
/// category when present, else the first member) and the whole set is
/// replaced with one deep copy of that template per target category. The
/// walk recurses through generic containers so plural sets nested inside
/// substitution wrappers are re-keyed too; it does not descend into the
/// re-keyed members themselves. An empty plural set is returned unchanged.
#[must_use]
pub fn rekey_plurals(value: &LocalizedValue, categories: &[&str]) -> LocalizedValue {
    match value {
        LocalizedValue::Plural(members) => {
            let Some(template) =
                members.get(TEMPLATE_CATEGORY).or_else(|| members.values().next())
            else {
                return LocalizedValue::Plural(Members::new());
            };
            let rekeyed = categories
                .iter()
                .map(|category| ((*category).to_string(), template.clone()))
                .collect();
            LocalizedValue::Plural(rekeyed)
        }
        LocalizedValue::Group(members) => {
            let walked = members
                .iter()
                .map(|(key, member)| (key.clone(), rekey_plurals(member, categories)))
                .collect();
            LocalizedValue::Group(walked)
        }
        LocalizedValue::Unit(unit) => LocalizedValue::Unit(unit.clone()),
        LocalizedValue::Scalar(scalar) => LocalizedValue::Scalar(scalar.clone()),
    }
}
