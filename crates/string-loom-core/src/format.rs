// crates/string-loom-core/src/format.rs
// ============================================================================
// Module: Stable Catalog Serialization
// Description: Byte-stable text rendering of catalogs and derived output.
// Purpose: Match the consuming toolchain's exact catalog formatting.
// Dependencies: crate::catalog, serde, serde_json
// ============================================================================

//! ## Overview
//! The catalog file format is a compatibility requirement, not an aesthetic
//! choice: sorted keys, 2-space indentation, a `" : "` separator between key
//! and value, and full Unicode preserved without escaping. A custom
//! `serde_json` formatter produces that rendering. Derived outputs (context
//! and template JSON) use ordinary 2-space pretty printing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::io::Write;

use serde::Serialize;
use serde_json::Serializer;

use crate::catalog::Catalog;
use crate::catalog::CatalogError;

// ============================================================================
// SECTION: Catalog Formatter
// ============================================================================

/// Two-space indent unit.
const INDENT: &[u8] = b"  ";

/// Padded key separator required by the consuming toolchain.
const KEY_SEPARATOR: &[u8] = b" : ";

/// JSON formatter emitting the catalog file convention.
///
/// # Invariants
/// - Output differs from standard pretty JSON only in the key separator.
#[derive(Debug, Clone, Copy, Default)]
struct CatalogFormatter {
    /// Current nesting depth in indent units.
    depth: usize,
    /// Whether the container being closed has emitted at least one value.
    has_value: bool,
}

/// Writes `depth` indent units.
fn write_indent<W>(writer: &mut W, depth: usize) -> io::Result<()>
where
    W: ?Sized + Write,
{
    for _ in 0..depth {
        writer.write_all(INDENT)?;
    }
    Ok(())
}

impl serde_json::ser::Formatter for CatalogFormatter {
    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.depth += 1;
        self.has_value = false;
        writer.write_all(b"[")
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.depth -= 1;
        if self.has_value {
            writer.write_all(b"\n")?;
            write_indent(writer, self.depth)?;
        }
        writer.write_all(b"]")
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            writer.write_all(b"\n")?;
        } else {
            writer.write_all(b",\n")?;
        }
        write_indent(writer, self.depth)
    }

    fn end_array_value<W>(&mut self, _writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.has_value = true;
        Ok(())
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.depth += 1;
        self.has_value = false;
        writer.write_all(b"{")
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.depth -= 1;
        if self.has_value {
            writer.write_all(b"\n")?;
            write_indent(writer, self.depth)?;
        }
        writer.write_all(b"}")
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            writer.write_all(b"\n")?;
        } else {
            writer.write_all(b",\n")?;
        }
        write_indent(writer, self.depth)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(KEY_SEPARATOR)
    }

    fn end_object_value<W>(&mut self, _writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.has_value = true;
        Ok(())
    }
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders a catalog into its stable file serialization.
///
/// # Errors
/// Returns [`CatalogError::Serialize`] when rendering fails.
pub fn to_catalog_string(catalog: &Catalog) -> Result<String, CatalogError> {
    let tree = catalog.to_json();
    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, CatalogFormatter::default());
    tree.serialize(&mut serializer).map_err(|err| CatalogError::Serialize(err.to_string()))?;
    String::from_utf8(buffer).map_err(|err| CatalogError::Serialize(err.to_string()))
}

/// Renders a derived output (context or template) as 2-space pretty JSON.
///
/// # Errors
/// Returns [`CatalogError::Serialize`] when rendering fails.
pub fn to_pretty_string<T>(value: &T) -> Result<String, CatalogError>
where
    T: Serialize,
{
    serde_json::to_string_pretty(value).map_err(|err| CatalogError::Serialize(err.to_string()))
}
