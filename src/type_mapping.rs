#![deny(missing_docs)]

//! # Type Mapping
//!
//! Static lookup from a primitive type identifier to its canonical OpenAPI
//! schema type string. No state, no recursion; unknown identifiers map to
//! nothing, so callers check built-in-ness before relying on a mapping.

use std::fmt::Display;

/// The recognized built-in primitive type identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// Text values.
    String,
    /// Floating point numbers.
    Number,
    /// Whole numbers.
    Integer,
    /// True/false values.
    Boolean,
    /// The generic array marker. Carries no item type of its own; item types
    /// default to `"string"` when no richer declaration exists.
    Array,
    /// An untyped object leaf.
    Object,
}

impl Primitive {
    /// Returns the canonical OpenAPI schema type string for this primitive.
    pub fn schema_type(&self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Number => "number",
            Primitive::Integer => "integer",
            Primitive::Boolean => "boolean",
            Primitive::Array => "array",
            Primitive::Object => "object",
        }
    }

    /// Looks up a primitive by its type identifier name.
    ///
    /// Returns `None` for identifiers outside the recognized set; those are
    /// model references, not primitives.
    pub fn from_name(name: &str) -> Option<Primitive> {
        match name {
            "String" => Some(Primitive::String),
            "Number" => Some(Primitive::Number),
            "Integer" => Some(Primitive::Integer),
            "Boolean" => Some(Primitive::Boolean),
            "Array" => Some(Primitive::Array),
            "Object" => Some(Primitive::Object),
            _ => None,
        }
    }
}

impl Display for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.schema_type())
    }
}

/// Maps a primitive type identifier name to its canonical schema type string.
///
/// A static finite mapping (e.g. `Number -> "number"`, `String -> "string"`).
/// No fallback for unknown names.
pub fn map_type_to_schema_type(name: &str) -> Option<&'static str> {
    Primitive::from_name(name).map(|p| p.schema_type())
}
