#![deny(missing_docs)]

//! # Model Descriptors
//!
//! Definition of the input-side structures: type descriptors, per-property
//! declarative metadata, and operation parameters.
//!
//! These structs are what callers annotate; the generator walks them and
//! emits [`SchemaObject`](crate::schema::SchemaObject) values.

use crate::schema::SchemaObject;
use crate::type_mapping::Primitive;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map as JsonMap, Value as JsonValue};
use std::fmt;
use std::sync::Arc;

/// A zero-argument resolver returning the actual type, used to express a
/// reference before the referenced type is fully declared.
pub type DeferredResolver = dyn Fn() -> TypeRef + Send + Sync;

/// A declared property type.
///
/// `Deferred` is the mechanism for breaking declaration-order cycles between
/// mutually referencing models: at least one side declares a thunk instead of
/// a concrete descriptor, and the thunk is invoked at traversal time.
#[derive(Clone)]
pub enum TypeRef {
    /// A recognized built-in primitive.
    Primitive(Primitive),
    /// A nested model reference.
    Model(Arc<TypeDescriptor>),
    /// An already-concrete literal schema type string, passed through as-is.
    Inline(String),
    /// A deferred resolver, invoked with no arguments at traversal time.
    Deferred(Arc<DeferredResolver>),
}

impl TypeRef {
    /// Wraps a closure as a deferred type reference.
    pub fn deferred<F>(resolver: F) -> Self
    where
        F: Fn() -> TypeRef + Send + Sync + 'static,
    {
        TypeRef::Deferred(Arc::new(resolver))
    }

    /// Resolves deferred references by repeated invocation until a concrete
    /// variant is reached.
    pub(crate) fn resolve_deferred(&self) -> TypeRef {
        let mut current = self.clone();
        loop {
            match current {
                TypeRef::Deferred(resolver) => current = resolver(),
                concrete => return concrete,
            }
        }
    }
}

// Manual Debug implementation: the thunk variant has no useful Debug form.
impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(p) => write!(f, "TypeRef::Primitive({:?})", p),
            TypeRef::Model(m) => write!(f, "TypeRef::Model({:?})", m.name),
            TypeRef::Inline(s) => write!(f, "TypeRef::Inline({:?})", s),
            TypeRef::Deferred(_) => write!(f, "TypeRef::Deferred(..)"),
        }
    }
}

/// A handle to a model type.
///
/// The `name` is the stable schema registry key; `properties` is the ordered
/// list of declared properties carrying schema metadata (deterministic
/// ordering, no duplicates). The generator never mutates a descriptor.
#[derive(Debug, Default)]
pub struct TypeDescriptor {
    /// Stable type name, used as the registry key and in `$ref` paths.
    pub name: String,
    /// Declared properties in declaration order.
    pub properties: IndexMap<String, PropertyMetadata>,
}

impl TypeDescriptor {
    /// Creates an empty descriptor with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: IndexMap::new(),
        }
    }

    /// Adds a declared property (builder style).
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, metadata: PropertyMetadata) -> Self {
        self.properties.insert(key.into(), metadata);
        self
    }

    /// Wraps the descriptor for sharing across references and thunks.
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

/// Per-property declaration, keyed by property name in the owning descriptor.
///
/// Recognized bookkeeping fields are named; everything else schema-valid
/// (format, description, default, example, ...) goes into `extra` and passes
/// through every transformation unmodified. Recognized fields win on a name
/// collision with `extra`.
#[derive(Debug, Clone)]
pub struct PropertyMetadata {
    /// The declared type. `None` means the declaration never specified a
    /// resolvable type, which surfaces as an error during traversal.
    pub type_ref: Option<TypeRef>,
    /// Whether the property is an array of the declared type.
    pub is_array: bool,
    /// Whether the property is required. Defaults to `true`; only an
    /// explicit `false` removes it from the enclosing `required` list.
    pub required: bool,
    /// Override for the emitted property key.
    pub name: Option<String>,
    /// Allowed enumeration values.
    pub enum_values: Option<Vec<JsonValue>>,
    /// Open pass-through set of additional schema-valid fields.
    pub extra: JsonMap<String, JsonValue>,
}

impl Default for PropertyMetadata {
    fn default() -> Self {
        Self {
            type_ref: None,
            is_array: false,
            required: true,
            name: None,
            enum_values: None,
            extra: JsonMap::new(),
        }
    }
}

impl PropertyMetadata {
    /// Creates metadata declaring the given type.
    pub fn of(type_ref: TypeRef) -> Self {
        Self {
            type_ref: Some(type_ref),
            ..Self::default()
        }
    }

    /// Creates metadata declaring a built-in primitive type.
    pub fn primitive(primitive: Primitive) -> Self {
        Self::of(TypeRef::Primitive(primitive))
    }

    /// Creates metadata declaring a nested model type.
    pub fn model(descriptor: Arc<TypeDescriptor>) -> Self {
        Self::of(TypeRef::Model(descriptor))
    }

    /// Marks the property as an array of its declared type.
    #[must_use]
    pub fn array(mut self) -> Self {
        self.is_array = true;
        self
    }

    /// Marks the property as not required.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Overrides the emitted property key.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Restricts the property to the given enumeration values.
    #[must_use]
    pub fn with_enum(mut self, values: Vec<JsonValue>) -> Self {
        self.enum_values = Some(values);
        self
    }

    /// Attaches an arbitrary pass-through schema field.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// The source location of an operation parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamSource {
    /// Conveyed in the payload body; eligible for schema expansion.
    Body,
    /// Path.
    Path,
    /// Query.
    Query,
    /// Header.
    Header,
}

/// Represents an operation parameter.
///
/// Only body-carried parameters are rewritten by the schema builder; all
/// others pass through untouched.
#[derive(Debug, Clone, Serialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Location.
    #[serde(rename = "in")]
    pub source: ParamSource,
    /// Declared type, if any.
    #[serde(skip)]
    pub type_ref: Option<TypeRef>,
    /// Whether the parameter is an array of the declared type.
    #[serde(skip)]
    pub is_array: bool,
    /// Whether the parameter is required.
    pub required: bool,
    /// Schema attached by the builder. Absent until a body parameter with a
    /// schema-bearing type has been processed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaObject>,
}

impl Parameter {
    /// Creates a parameter with the given name, location and declared type.
    pub fn new(name: impl Into<String>, source: ParamSource, type_ref: Option<TypeRef>) -> Self {
        Self {
            name: name.into(),
            source,
            type_ref,
            is_array: false,
            required: true,
            schema: None,
        }
    }

    /// Marks the parameter as an array of its declared type.
    #[must_use]
    pub fn array(mut self) -> Self {
        self.is_array = true;
        self
    }

    /// Marks the parameter as not required.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}
