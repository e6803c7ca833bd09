#![deny(missing_docs)]

//! # Schema Registry
//!
//! Stores derived schema definitions for a `components/schemas` document
//! section, together with the per-traversal visitation stack used for cycle
//! detection. Both are created fresh per top-level build call and threaded
//! by mutable reference through the whole recursive descent; neither is
//! global or persisted between calls.

use crate::schema::SchemaObject;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeSeq, Serializer};

/// An ordered, append-only sequence of `{TypeName -> SchemaObject}` entries.
///
/// No deduplication: re-deriving the same type name appends a second entry
/// rather than replacing or skipping. Consumers flatten via
/// [`into_components`](SchemaRegistry::into_components).
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    entries: Vec<(String, SchemaObject)>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a named schema definition.
    pub fn register(&mut self, name: impl Into<String>, schema: SchemaObject) {
        self.entries.push((name.into(), schema));
    }

    /// Number of registered entries (duplicates counted).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaObject)> {
        self.entries.iter().map(|(name, schema)| (name.as_str(), schema))
    }

    /// Flattens the registry into a single `components.schemas`-shaped
    /// mapping keyed by type name.
    ///
    /// Flattening rule: **last wins**. A later registration of the same name
    /// was derived after the earlier one and is never staler, so it replaces
    /// it in the flattened view. The registry itself keeps both entries.
    pub fn into_components(self) -> IndexMap<String, SchemaObject> {
        let mut components = IndexMap::new();
        for (name, schema) in self.entries {
            components.insert(name, schema);
        }
        components
    }
}

// Serializes as the document fragment consumers expect:
// an array of single-entry mappings, in registration order.
impl Serialize for SchemaRegistry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
        for (name, schema) in &self.entries {
            let mut single = IndexMap::with_capacity(1);
            single.insert(name.as_str(), schema);
            seq.serialize_element(&single)?;
        }
        seq.end()
    }
}

/// The ordered set of type names already explored during one top-level
/// derivation.
///
/// Names are pushed when a reference is first explored and never popped
/// within the same build call; re-deriving a name already on the stack would
/// either loop forever (cycles) or duplicate shared definitions (diamonds).
/// Discarded after the build completes.
#[derive(Debug, Default)]
pub struct VisitationStack {
    names: Vec<String>,
}

impl VisitationStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the name has already been explored in this traversal.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Records a name as explored.
    pub fn push(&mut self, name: impl Into<String>) {
        self.names.push(name.into());
    }
}
