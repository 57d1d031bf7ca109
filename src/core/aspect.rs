//! Declarative per-field aspect metadata
//!
//! An [`AspectSchema`] describes, for each entity attribute, whether it can
//! be filtered on, whether it is exported to clients, whether an update may
//! modify it, and whether filtering is strict. Controllers consult the
//! schema at request time; there is no reflection involved.

use indexmap::IndexMap;
use serde_json::Value;

/// Filtering/export/mutability flags for a single entity attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aspect {
    /// Can clients ask for entities with this attribute via query params?
    pub filterable: bool,
    /// Is this attribute included in the returned DTO? Set to false to keep
    /// it inside the application and away from nosy clients.
    pub exported: bool,
    /// Can this attribute be changed by an update request?
    pub modifiable: bool,
    /// Exact matching instead of case-insensitive like-matching when
    /// filtering. Leave false to allow `%` wildcards.
    pub strict: bool,
}

impl Default for Aspect {
    fn default() -> Self {
        Self {
            filterable: true,
            exported: true,
            modifiable: true,
            strict: false,
        }
    }
}

impl Aspect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    pub fn exported(mut self, exported: bool) -> Self {
        self.exported = exported;
        self
    }

    pub fn modifiable(mut self, modifiable: bool) -> Self {
        self.modifiable = modifiable;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Schema mapping attribute names to their aspects, in declaration order
///
/// Attributes not listed get [`Aspect::default`]. The id attribute is
/// always exported regardless of the schema.
#[derive(Debug, Clone, Default)]
pub struct AspectSchema {
    fields: IndexMap<String, Aspect>,
}

impl AspectSchema {
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
        }
    }

    /// Declare an attribute's aspect. Re-declaring replaces the earlier one.
    pub fn with_field(mut self, name: impl Into<String>, aspect: Aspect) -> Self {
        self.fields.insert(name.into(), aspect);
        self
    }

    /// Look up an attribute's aspect, falling back to the defaults
    pub fn aspect(&self, name: &str) -> Aspect {
        self.fields.get(name).copied().unwrap_or_default()
    }

    pub fn is_filterable(&self, name: &str) -> bool {
        self.aspect(name).filterable
    }

    pub fn is_exported(&self, name: &str) -> bool {
        name == "id" || self.aspect(name).exported
    }

    pub fn is_modifiable(&self, name: &str) -> bool {
        self.aspect(name).modifiable
    }

    pub fn is_strict(&self, name: &str) -> bool {
        self.aspect(name).strict
    }

    /// Declared attribute names, in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Strip non-exported attributes from an outgoing JSON value
    ///
    /// Objects lose their non-exported keys, arrays are projected
    /// element-wise, scalars pass through untouched.
    pub fn project(&self, value: Value) -> Value {
        match value {
            Value::Object(map) => Value::Object(
                map.into_iter()
                    .filter(|(key, _)| self.is_exported(key))
                    .collect(),
            ),
            Value::Array(items) => {
                Value::Array(items.into_iter().map(|item| self.project(item)).collect())
            }
            other => other,
        }
    }
}
