// crates/string-loom-core/src/catalog/value.rs
// ============================================================================
// Module: Localization Value Model
// Description: Recursive tagged model for one key's localized value.
// Purpose: Give the shape transformer and coverage classifier a typed tree.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A localization value is a recursive structure: a leaf translation unit,
//! a plural variation set, or an arbitrarily nested container (variations
//! wrappers, format-argument substitutions). The model tags each node so the
//! engine walks an explicit variant instead of an untyped JSON tree.
//!
//! ## Invariants
//! - Conversion from JSON is total: every JSON value maps to some node.
//! - Conversion is lossless: `to_json` restores the exact input tree.
//! - A plural container is recognized by structural position (a `plural`
//!   member directly inside a `variations` container), never by a name
//!   collision with a substitution argument.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde_json::Map;
use serde_json::Value;

// ============================================================================
// SECTION: Structural Markers
// ============================================================================

/// Member key that carries a leaf translation unit.
pub const UNIT_MARKER: &str = "stringUnit";

/// Member key that carries a plural variation set inside a variations
/// container.
pub const PLURAL_MARKER: &str = "plural";

/// Member key that wraps variation sets (plural, device, and future kinds).
pub const VARIATIONS_MARKER: &str = "variations";

/// The only translation state this tool ever writes. States already present
/// in input are preserved unless the value is overwritten.
pub const TRANSLATED_STATE: &str = "translated";

// ============================================================================
// SECTION: Leaf Unit
// ============================================================================

/// The smallest translatable element: a state marker plus text.
///
/// # Invariants
/// - `state` and `text` mirror the `state`/`value` fields of the wire form.
/// - An empty `text` is a legal, present translation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringUnit {
    /// Translation state marker (for example `translated` or `new`).
    pub state: String,
    /// Translated text; may be empty.
    pub text: String,
}

impl StringUnit {
    /// Constructs a unit in the `translated` state.
    #[must_use]
    pub fn translated(text: impl Into<String>) -> Self {
        Self {
            state: TRANSLATED_STATE.to_string(),
            text: text.into(),
        }
    }

    /// Parses a unit from the payload of a `stringUnit` member.
    ///
    /// Returns `None` unless the payload is exactly a string `state` plus a
    /// string `value`; any other payload stays a generic container so odd
    /// metadata fields pass through untouched.
    #[must_use]
    pub fn from_json(payload: &Value) -> Option<Self> {
        let members = payload.as_object()?;
        if members.len() != 2 {
            return None;
        }
        let state = members.get("state")?.as_str()?;
        let text = members.get("value")?.as_str()?;
        Some(Self {
            state: state.to_string(),
            text: text.to_string(),
        })
    }

    /// Renders the unit back into its wire payload.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut members = Map::new();
        members.insert("state".to_string(), Value::String(self.state.clone()));
        members.insert("value".to_string(), Value::String(self.text.clone()));
        Value::Object(members)
    }
}

// ============================================================================
// SECTION: Localization Value
// ============================================================================

/// Ordered members of a container node.
pub type Members = BTreeMap<String, LocalizedValue>;

/// One localized value in its recursive shape.
///
/// # Invariants
/// - `Unit` only ever appears under a `stringUnit` member key.
/// - `Plural` only ever appears under a `plural` member key that sits
///   directly inside a `variations` container.
/// - `Scalar` holds non-object metadata (`argNum`, `formatSpecifier`, and
///   similar) verbatim; the engine never rewrites it.
#[derive(Debug, Clone, PartialEq)]
pub enum LocalizedValue {
    /// Leaf translation unit.
    Unit(StringUnit),
    /// Plural variation set keyed by plural category name.
    Plural(Members),
    /// Any other container: variations wrappers, substitutions, nested
    /// format-argument structures.
    Group(Members),
    /// Non-object metadata preserved verbatim.
    Scalar(Value),
}

impl LocalizedValue {
    /// Converts an arbitrary JSON value into the tagged model.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Object(members) => Self::Group(convert_members(members, false)),
            other => Self::Scalar(other.clone()),
        }
    }

    /// Renders the value back into its JSON wire form.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Unit(unit) => unit.to_json(),
            Self::Plural(members) | Self::Group(members) => {
                let mut object = Map::new();
                for (key, member) in members {
                    object.insert(key.clone(), member.to_json());
                }
                Value::Object(object)
            }
            Self::Scalar(value) => value.clone(),
        }
    }

    /// Builds the canonical wrapped form of a plain translation: a container
    /// holding a single `stringUnit` member in the `translated` state.
    #[must_use]
    pub fn translated_unit(text: impl Into<String>) -> Self {
        let mut members = Members::new();
        members.insert(UNIT_MARKER.to_string(), Self::Unit(StringUnit::translated(text)));
        Self::Group(members)
    }
}

/// Converts the members of a JSON object, tagging units and plural sets.
///
/// `in_variations` is true when the object being converted is the payload of
/// a `variations` member; only there does a `plural` member denote a plural
/// variation set.
fn convert_members(members: &Map<String, Value>, in_variations: bool) -> Members {
    let mut converted = Members::new();
    for (key, value) in members {
        let node = convert_member(key, value, in_variations);
        converted.insert(key.clone(), node);
    }
    converted
}

/// Converts a single member value using its key for structural tagging.
fn convert_member(key: &str, value: &Value, in_variations: bool) -> LocalizedValue {
    if key == UNIT_MARKER
        && let Some(unit) = StringUnit::from_json(value)
    {
        return LocalizedValue::Unit(unit);
    }
    match value {
        Value::Object(inner) if key == PLURAL_MARKER && in_variations => {
            LocalizedValue::Plural(convert_members(inner, false))
        }
        Value::Object(inner) => {
            LocalizedValue::Group(convert_members(inner, key == VARIATIONS_MARKER))
        }
        other => LocalizedValue::Scalar(other.clone()),
    }
}

// ============================================================================
// SECTION: Serde Bridging
// ============================================================================

impl Serialize for LocalizedValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LocalizedValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}
