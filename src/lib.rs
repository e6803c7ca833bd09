#![deny(missing_docs)]

//! # OpenAPI Model Generation
//!
//! Derives OpenAPI-style schema definitions from a graph of annotated model
//! descriptors: a registry of named definitions for a `components/schemas`
//! document section, and per-parameter schema fragments referencing them.

/// Shared error types.
pub mod error;

/// Input-side model descriptors and parameter declarations.
pub mod model;

/// Type mapping logic (primitive identifiers -> schema type strings).
pub mod type_mapping;

/// Schema Object output representation.
pub mod schema;

/// Schema registry and per-traversal visitation stack.
pub mod registry;

/// The schema derivation engine and property resolver.
pub mod generator;

/// Array and reference composition, including cycle detection.
pub mod compose;

/// Parameter schema building.
pub mod params;

pub use error::{AppError, AppResult};
pub use generator::{derive_schema, register_model_schema, resolve_property};
pub use model::{
    DeferredResolver, ParamSource, Parameter, PropertyMetadata, TypeDescriptor, TypeRef,
};
pub use params::build_parameter_schemas;
pub use registry::{SchemaRegistry, VisitationStack};
pub use schema::{schema_ref_path, ResolvedProperty, SchemaObject};
pub use type_mapping::{map_type_to_schema_type, Primitive};
