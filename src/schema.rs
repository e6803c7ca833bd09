#![deny(missing_docs)]

//! # Schema Objects
//!
//! The uniform output representation for OpenAPI 3 Schema Objects, plus the
//! resolved-property fragment passed between the generator stages.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};

/// Builds the document-local reference path for a named schema definition.
///
/// Stable for a fixed name: calling it twice yields identical strings.
pub fn schema_ref_path(name: &str) -> String {
    format!("#/components/schemas/{}", name)
}

/// An OpenAPI 3 Schema Object.
///
/// One struct covers every shape the generator emits: object schemas
/// (`properties` + `required`), leaf schemas (`type` + pass-through fields),
/// array schemas (`type: array` + `items`), references (`$ref`) and `allOf`
/// compositions. Absent fields are omitted from serialization, so a
/// reference built by [`SchemaObject::reference`] serializes as `{"$ref":
/// ...}` with no siblings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaObject {
    /// Schema type string (`"object"`, `"string"`, `"array"`, ...).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,

    /// Item schema for array types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaObject>>,

    /// Reference path (e.g. `#/components/schemas/Cat`).
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// `allOf` composition members.
    #[serde(rename = "allOf", default, skip_serializing_if = "Option::is_none")]
    pub all_of: Option<Vec<SchemaObject>>,

    /// Schema title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Object properties, keyed by emitted property name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaObject>,

    /// Required property names. When serialized it is non-empty and lists
    /// only names present in `properties`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    /// Allowed enumeration values.
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<JsonValue>>,

    /// Open pass-through fields (format, description, default, example, ...).
    /// Named fields above win on collision when deserializing.
    #[serde(flatten)]
    pub extra: JsonMap<String, JsonValue>,
}

impl SchemaObject {
    /// Creates a leaf schema with the given type string.
    pub fn leaf(schema_type: impl Into<String>) -> Self {
        Self {
            schema_type: Some(schema_type.into()),
            ..Self::default()
        }
    }

    /// Creates a reference schema pointing at a named definition.
    pub fn reference(name: &str) -> Self {
        Self {
            reference: Some(schema_ref_path(name)),
            ..Self::default()
        }
    }

    /// Creates an object schema from assembled properties and required names.
    pub fn object(properties: IndexMap<String, SchemaObject>, required: Vec<String>) -> Self {
        Self {
            schema_type: Some("object".to_string()),
            properties,
            required,
            ..Self::default()
        }
    }
}

/// A resolved property fragment: the emitted name, the required flag, and the
/// schema the enclosing object embeds under that name.
///
/// The bookkeeping fields (`name`, `required`) never leak into the embedded
/// schema; the engine consumes them when assembling `properties`/`required`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProperty {
    /// Emitted property key (override or the original declaration key).
    pub name: String,
    /// Whether the property joins the enclosing `required` list.
    pub required: bool,
    /// The schema embedded under the emitted key.
    pub schema: SchemaObject,
}
