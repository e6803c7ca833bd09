#![deny(missing_docs)]

//! # Parameter Schema Builder
//!
//! Top-level entry point: rewrites body-carried operation parameters into
//! schema-bearing shapes, registering model definitions as a side effect.
//! All other parameters pass through untouched.

use crate::compose::array_of;
use crate::error::AppResult;
use crate::generator::register_model_schema;
use crate::model::{ParamSource, Parameter, PropertyMetadata, TypeRef};
use crate::registry::SchemaRegistry;
use crate::schema::SchemaObject;
use crate::type_mapping::Primitive;

/// Builds schemas for a list of operation parameters.
///
/// For each parameter: non-body parameters and known-primitive body
/// parameters are returned unchanged. A body parameter declared as the bare
/// array marker expands to `{type: "array", items: {type: "string"}}` (the
/// conservative default when no richer item type is declared). A body
/// parameter declaring a model type gets the model derived and registered,
/// and its schema rewritten to a `$ref` (array-wrapped when the parameter
/// itself is an array of that model).
///
/// Side effect: appends new definitions to `registry`. Errors surface only
/// from the derivation engine.
pub fn build_parameter_schemas(
    parameters: Vec<Parameter>,
    registry: &mut SchemaRegistry,
) -> AppResult<Vec<Parameter>> {
    parameters
        .into_iter()
        .map(|param| build_parameter(param, registry))
        .collect()
}

fn build_parameter(mut param: Parameter, registry: &mut SchemaRegistry) -> AppResult<Parameter> {
    if param.source != ParamSource::Body {
        return Ok(param);
    }

    let Some(resolved) = param.type_ref.as_ref().map(TypeRef::resolve_deferred) else {
        return Ok(param);
    };

    match resolved {
        TypeRef::Primitive(Primitive::Array) => {
            param.schema = Some(array_of(
                &PropertyMetadata::default(),
                SchemaObject::leaf("string"),
            ));
        }
        TypeRef::Primitive(_) | TypeRef::Inline(_) => {}
        TypeRef::Model(model) => {
            log::debug!(
                "expanding body parameter '{}' to a '{}' schema reference",
                param.name,
                model.name
            );
            let name = register_model_schema(&model, registry)?;
            let reference = SchemaObject::reference(&name);
            param.schema = Some(if param.is_array {
                array_of(&PropertyMetadata::default(), reference)
            } else {
                reference
            });
        }
        // resolve_deferred never yields Deferred
        TypeRef::Deferred(_) => unreachable!("deferred reference left unresolved"),
    }

    Ok(param)
}
