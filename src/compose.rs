#![deny(missing_docs)]

//! # Composite Shapes
//!
//! Normalization of the two composite schema shapes: `{type: "array",
//! items: ...}` wrappers and `$ref` fragments (plain or wrapped in `allOf`
//! when extra constraints ride along). Owns cycle detection for nested model
//! references.

use crate::error::{AppError, AppResult};
use crate::generator::derive_schema;
use crate::model::{PropertyMetadata, TypeDescriptor, TypeRef};
use crate::registry::{SchemaRegistry, VisitationStack};
use crate::schema::{ResolvedProperty, SchemaObject};
use std::sync::Arc;

/// Wraps an item schema in the `{type: "array", items: ...}` shape.
///
/// The single normalization point for every "array of T" in the system,
/// whether T is a primitive, a model reference, or the degenerate untyped
/// array. `type` and `enum` from the passed-through metadata are stripped at
/// the array level: they describe the item, not the array.
pub(crate) fn array_of(meta: &PropertyMetadata, item: SchemaObject) -> SchemaObject {
    let mut extra = meta.extra.clone();
    extra.remove("type");
    extra.remove("enum");

    SchemaObject {
        schema_type: Some("array".to_string()),
        items: Some(Box::new(item)),
        extra,
        ..SchemaObject::default()
    }
}

/// Resolves a property whose type is a nested model reference (or is missing
/// entirely).
///
/// A missing type means the declaration failed to break a circular
/// relationship with a deferred reference; that fails fast, naming the
/// offending property key. Otherwise the referenced model is derived unless
/// its name is already on the visitation stack, in which case the name is
/// reused directly: `$ref` resolves by name, so pointing at a definition
/// still being built is sound.
pub(crate) fn reference_property(
    key: &str,
    emitted_name: String,
    meta: &PropertyMetadata,
    model: Option<Arc<TypeDescriptor>>,
    registry: &mut SchemaRegistry,
    stack: &mut VisitationStack,
) -> AppResult<ResolvedProperty> {
    let Some(model) = model else {
        return Err(AppError::UnresolvableReference(key.to_string()));
    };

    let name = model.name.clone();
    if stack.contains(&name) {
        log::trace!("'{}' already on the visitation stack, reusing by name", name);
    } else {
        stack.push(name.clone());
        derive_schema(&TypeRef::Model(model), registry, stack)?;
    }

    let reference = SchemaObject::reference(&name);
    let has_constraints = !meta.extra.is_empty() || meta.enum_values.is_some();

    let schema = if meta.is_array {
        array_of(meta, reference)
    } else if has_constraints {
        // Extra constraints cannot sit next to `$ref`; attach them through
        // an allOf composition instead.
        let constraints = SchemaObject {
            enum_values: meta.enum_values.clone(),
            extra: meta.extra.clone(),
            ..SchemaObject::default()
        };
        SchemaObject {
            title: Some(name.clone()),
            all_of: Some(vec![reference, constraints]),
            ..SchemaObject::default()
        }
    } else {
        reference
    };

    Ok(ResolvedProperty {
        name: emitted_name,
        required: meta.required,
        schema,
    })
}
