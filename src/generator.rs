#![deny(missing_docs)]

//! # Schema Derivation
//!
//! The recursive graph walk that turns a type reference into a registered
//! schema definition. The registry and visitation stack are shared mutable
//! state across the whole traversal, passed by mutable reference down the
//! call tree; the return value of each call is only the name or fragment the
//! caller needs.

use crate::compose::{array_of, reference_property};
use crate::error::AppResult;
use crate::model::{PropertyMetadata, TypeDescriptor, TypeRef};
use crate::registry::{SchemaRegistry, VisitationStack};
use crate::schema::{ResolvedProperty, SchemaObject};
use crate::type_mapping::Primitive;
use indexmap::IndexMap;
use std::sync::Arc;

/// Derives and registers the schema for a model, owning the traversal state
/// for one top-level build.
///
/// Creates a fresh visitation stack seeded with the root model's name, so a
/// cycle closing back on the root is reused by name instead of re-derived.
/// Returns the registered definition name.
pub fn register_model_schema(
    model: &Arc<TypeDescriptor>,
    registry: &mut SchemaRegistry,
) -> AppResult<String> {
    let mut stack = VisitationStack::new();
    stack.push(model.name.clone());
    derive_schema(&TypeRef::Model(model.clone()), registry, &mut stack)
}

/// Derives the named schema definition for a type.
///
/// Walks every declared property through [`resolve_property`], assembles the
/// `properties` map (keyed by emitted names) and the `required` list
/// (default-required policy: a property is required unless it explicitly
/// opted out), appends `{name: schema}` to the registry and returns the
/// name. Non-model input yields an empty name with nothing registered;
/// callers treat that as "no schema produced", not an error.
pub fn derive_schema(
    type_ref: &TypeRef,
    registry: &mut SchemaRegistry,
    stack: &mut VisitationStack,
) -> AppResult<String> {
    let TypeRef::Model(model) = type_ref.resolve_deferred() else {
        return Ok(String::new());
    };

    log::debug!("deriving schema for model '{}'", model.name);

    let mut properties = IndexMap::with_capacity(model.properties.len());
    let mut required = Vec::new();

    for (key, metadata) in &model.properties {
        let resolved = resolve_property(key, metadata, registry, stack)?;
        if resolved.required {
            required.push(resolved.name.clone());
        }
        properties.insert(resolved.name, resolved.schema);
    }

    registry.register(model.name.clone(), SchemaObject::object(properties, required));
    Ok(model.name.clone())
}

/// Resolves one declared property into a schema fragment.
///
/// Steps, in order: deferred references are resolved by invocation; literal
/// type strings pass through as leaf fragments; anything that is not a
/// recognized primitive goes to the reference composer (the nested-object
/// path, which also handles the missing-type failure); primitives are mapped
/// to their canonical type string, with arrays normalized through the array
/// composer and the bare array marker defaulting its item type to `"string"`.
pub fn resolve_property(
    key: &str,
    metadata: &PropertyMetadata,
    registry: &mut SchemaRegistry,
    stack: &mut VisitationStack,
) -> AppResult<ResolvedProperty> {
    let emitted_name = metadata.name.clone().unwrap_or_else(|| key.to_string());
    let resolved_type = metadata.type_ref.as_ref().map(TypeRef::resolve_deferred);

    let primitive = match resolved_type {
        Some(TypeRef::Inline(type_name)) => {
            return Ok(ResolvedProperty {
                name: emitted_name,
                required: metadata.required,
                schema: leaf_fragment(type_name, metadata),
            });
        }
        Some(TypeRef::Primitive(primitive)) => primitive,
        Some(TypeRef::Model(model)) => {
            return reference_property(key, emitted_name, metadata, Some(model), registry, stack);
        }
        None => {
            return reference_property(key, emitted_name, metadata, None, registry, stack);
        }
        // resolve_deferred never yields Deferred
        Some(TypeRef::Deferred(_)) => unreachable!("deferred reference left unresolved"),
    };

    let schema = if primitive == Primitive::Array {
        // Untyped array marker: no richer item declaration exists, so the
        // item type conservatively defaults to "string".
        array_of(metadata, item_fragment("string", metadata))
    } else if metadata.is_array {
        array_of(metadata, item_fragment(primitive.schema_type(), metadata))
    } else {
        leaf_fragment(primitive.schema_type().to_string(), metadata)
    };

    Ok(ResolvedProperty {
        name: emitted_name,
        required: metadata.required,
        schema,
    })
}

/// Builds a plain leaf fragment: mapped type plus enum and pass-through
/// fields from the declaration.
fn leaf_fragment(schema_type: String, metadata: &PropertyMetadata) -> SchemaObject {
    SchemaObject {
        schema_type: Some(schema_type),
        enum_values: metadata.enum_values.clone(),
        extra: metadata.extra.clone(),
        ..SchemaObject::default()
    }
}

/// Builds the item schema for an array property. Enum values constrain the
/// items, so they move inside; the array-level extras stay on the wrapper.
fn item_fragment(item_type: &str, metadata: &PropertyMetadata) -> SchemaObject {
    SchemaObject {
        schema_type: Some(item_type.to_string()),
        enum_values: metadata.enum_values.clone(),
        ..SchemaObject::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PropertyMetadata;
    use serde_json::json;

    #[test]
    fn test_derive_simple_model() {
        // Case: model with two primitive properties, one optional.
        // Expect: one registry entry, required lists only the first.
        let cat = TypeDescriptor::new("Cat")
            .with_property("name", PropertyMetadata::primitive(Primitive::String))
            .with_property(
                "age",
                PropertyMetadata::primitive(Primitive::Number).optional(),
            )
            .shared();

        let mut registry = SchemaRegistry::new();
        let name = register_model_schema(&cat, &mut registry).unwrap();

        assert_eq!(name, "Cat");
        assert_eq!(registry.len(), 1);

        let (_, schema) = registry.iter().next().unwrap();
        assert_eq!(
            serde_json::to_value(schema).unwrap(),
            json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "age": { "type": "number" }
                },
                "required": ["name"]
            })
        );
    }

    #[test]
    fn test_non_model_input_produces_no_schema() {
        let mut registry = SchemaRegistry::new();
        let mut stack = VisitationStack::new();

        let name = derive_schema(
            &TypeRef::Primitive(Primitive::String),
            &mut registry,
            &mut stack,
        )
        .unwrap();

        assert!(name.is_empty());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_name_override_keys_properties_and_required() {
        let model = TypeDescriptor::new("Login")
            .with_property(
                "user_name",
                PropertyMetadata::primitive(Primitive::String).named("userName"),
            )
            .shared();

        let mut registry = SchemaRegistry::new();
        register_model_schema(&model, &mut registry).unwrap();

        let (_, schema) = registry.iter().next().unwrap();
        assert!(schema.properties.contains_key("userName"));
        assert!(!schema.properties.contains_key("user_name"));
        assert_eq!(schema.required, vec!["userName".to_string()]);
    }

    #[test]
    fn test_inline_literal_passes_through_as_leaf() {
        let meta = PropertyMetadata::of(TypeRef::Inline("string".to_string()))
            .with_extra("format", json!("email"));
        let mut registry = SchemaRegistry::new();
        let mut stack = VisitationStack::new();

        let resolved = resolve_property("contact", &meta, &mut registry, &mut stack).unwrap();
        assert_eq!(
            serde_json::to_value(&resolved.schema).unwrap(),
            json!({ "type": "string", "format": "email" })
        );
    }

    #[test]
    fn test_primitive_array_wraps_items() {
        let meta = PropertyMetadata::primitive(Primitive::Number).array();
        let mut registry = SchemaRegistry::new();
        let mut stack = VisitationStack::new();

        let resolved = resolve_property("scores", &meta, &mut registry, &mut stack).unwrap();
        assert_eq!(
            serde_json::to_value(&resolved.schema).unwrap(),
            json!({ "type": "array", "items": { "type": "number" } })
        );
    }

    #[test]
    fn test_untyped_array_marker_defaults_items_to_string() {
        let meta = PropertyMetadata::primitive(Primitive::Array);
        let mut registry = SchemaRegistry::new();
        let mut stack = VisitationStack::new();

        let resolved = resolve_property("tags", &meta, &mut registry, &mut stack).unwrap();
        assert_eq!(
            serde_json::to_value(&resolved.schema).unwrap(),
            json!({ "type": "array", "items": { "type": "string" } })
        );
    }

    #[test]
    fn test_enum_moves_into_array_items() {
        let meta = PropertyMetadata::primitive(Primitive::String)
            .array()
            .with_enum(vec![json!("red"), json!("blue")]);
        let mut registry = SchemaRegistry::new();
        let mut stack = VisitationStack::new();

        let resolved = resolve_property("colors", &meta, &mut registry, &mut stack).unwrap();
        assert_eq!(
            serde_json::to_value(&resolved.schema).unwrap(),
            json!({
                "type": "array",
                "items": { "type": "string", "enum": ["red", "blue"] }
            })
        );
    }

    #[test]
    fn test_enum_stays_on_plain_leaf() {
        let meta = PropertyMetadata::primitive(Primitive::String)
            .with_enum(vec![json!("on"), json!("off")]);
        let mut registry = SchemaRegistry::new();
        let mut stack = VisitationStack::new();

        let resolved = resolve_property("state", &meta, &mut registry, &mut stack).unwrap();
        assert_eq!(
            serde_json::to_value(&resolved.schema).unwrap(),
            json!({ "type": "string", "enum": ["on", "off"] })
        );
    }

    #[test]
    fn test_nested_model_registers_and_references() {
        let toy = TypeDescriptor::new("Toy")
            .with_property("label", PropertyMetadata::primitive(Primitive::String))
            .shared();
        let cat = TypeDescriptor::new("Cat")
            .with_property("favorite", PropertyMetadata::model(toy))
            .shared();

        let mut registry = SchemaRegistry::new();
        register_model_schema(&cat, &mut registry).unwrap();

        // Nested definition lands before the parent that referenced it.
        let names: Vec<&str> = registry.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Toy", "Cat"]);

        let cat_schema = registry.iter().last().unwrap().1;
        assert_eq!(
            serde_json::to_value(&cat_schema.properties["favorite"]).unwrap(),
            json!({ "$ref": "#/components/schemas/Toy" })
        );
    }

    #[test]
    fn test_model_array_references_items() {
        let toy = TypeDescriptor::new("Toy").shared();
        let cat = TypeDescriptor::new("Cat")
            .with_property("toys", PropertyMetadata::model(toy).array())
            .shared();

        let mut registry = SchemaRegistry::new();
        register_model_schema(&cat, &mut registry).unwrap();

        let cat_schema = registry.iter().last().unwrap().1;
        assert_eq!(
            serde_json::to_value(&cat_schema.properties["toys"]).unwrap(),
            json!({
                "type": "array",
                "items": { "$ref": "#/components/schemas/Toy" }
            })
        );
    }
}
