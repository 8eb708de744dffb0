//! Declarative per-entity field schemas.
//!
//! A [`Schema`] is an ordered list of [`FieldDescriptor`]s. Each descriptor
//! names the field, the XML element it maps to, and a typed binding (getter
//! and setter function pointers) that the mapper uses to read and write the
//! entity. Schemas are built once per entity type and never mutated.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::SchemaError;
use crate::mapper::{Entity, NestedBinding, NestedList, NestedOne};

/// Element name pattern: no namespace prefix, no whitespace.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ELEMENT_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.-]*$").expect("valid regex"));

/// How a field's value is shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Single text value.
    Scalar,
    /// Repeated text values.
    ScalarList,
    /// Single nested entity.
    NestedEntity,
    /// Repeated nested entities.
    NestedEntityList,
}

/// Typed access to one field of an entity.
pub enum Binding<E> {
    /// Text field.
    Scalar {
        get: fn(&E) -> Option<&str>,
        set: fn(&mut E, String),
    },
    /// List of texts.
    ScalarList {
        get: fn(&E) -> Option<&[String]>,
        set: fn(&mut E, Vec<String>),
    },
    /// Nested entity of another type.
    Nested(Box<dyn NestedBinding<E>>),
    /// List of nested entities of another type.
    NestedList(Box<dyn NestedBinding<E>>),
}

/// Metadata for one entity field.
pub struct FieldDescriptor<E> {
    name: &'static str,
    wire_key: &'static str,
    binding: Binding<E>,
}

impl<E> FieldDescriptor<E> {
    /// Field name, used as the key in canonical form.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// XML element name, used for lookups and in wire form.
    #[must_use]
    pub fn wire_key(&self) -> &'static str {
        self.wire_key
    }

    #[must_use]
    pub fn binding(&self) -> &Binding<E> {
        &self.binding
    }

    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self.binding {
            Binding::Scalar { .. } => ValueKind::Scalar,
            Binding::ScalarList { .. } => ValueKind::ScalarList,
            Binding::Nested(_) => ValueKind::NestedEntity,
            Binding::NestedList(_) => ValueKind::NestedEntityList,
        }
    }

    /// Name of the nested entity type, for nested kinds only.
    #[must_use]
    pub fn nested_type(&self) -> Option<&'static str> {
        match &self.binding {
            Binding::Nested(nested) | Binding::NestedList(nested) => Some(nested.nested_type()),
            Binding::Scalar { .. } | Binding::ScalarList { .. } => None,
        }
    }
}

impl<E> fmt::Debug for FieldDescriptor<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("wire_key", &self.wire_key)
            .field("kind", &self.kind())
            .field("nested_type", &self.nested_type())
            .finish()
    }
}

/// Ordered, immutable field table for one entity type.
pub struct Schema<E> {
    entity: &'static str,
    fields: Vec<FieldDescriptor<E>>,
}

impl<E: Entity> Schema<E> {
    /// Start declaring the schema for `E`.
    #[must_use]
    pub fn builder() -> SchemaBuilder<E> {
        SchemaBuilder {
            entity: E::NAME,
            fields: Vec::new(),
            dangling_key: None,
        }
    }
}

impl<E> Schema<E> {
    /// Name of the entity this schema describes.
    #[must_use]
    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// Descriptors in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor<E>] {
        &self.fields
    }

    /// Look up a descriptor by field name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor<E>> {
        self.fields.iter().find(|field| field.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<E> fmt::Debug for Schema<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("entity", &self.entity)
            .field("fields", &self.fields)
            .finish()
    }
}

/// Builder for a [`Schema`].
///
/// Each field method appends a descriptor whose wire key defaults to the
/// field name; [`SchemaBuilder::wire_key`] renames the most recent one.
pub struct SchemaBuilder<E> {
    entity: &'static str,
    fields: Vec<FieldDescriptor<E>>,
    dangling_key: Option<&'static str>,
}

impl<E: Entity> SchemaBuilder<E> {
    /// Declare a text field.
    #[must_use]
    pub fn scalar(
        self,
        name: &'static str,
        get: fn(&E) -> Option<&str>,
        set: fn(&mut E, String),
    ) -> Self {
        self.push(name, Binding::Scalar { get, set })
    }

    /// Declare a list-of-text field.
    #[must_use]
    pub fn scalar_list(
        self,
        name: &'static str,
        get: fn(&E) -> Option<&[String]>,
        set: fn(&mut E, Vec<String>),
    ) -> Self {
        self.push(name, Binding::ScalarList { get, set })
    }

    /// Declare a nested entity field of type `N`.
    #[must_use]
    pub fn nested<N: Entity>(
        self,
        name: &'static str,
        get: fn(&E) -> Option<&N>,
        set: fn(&mut E, N),
    ) -> Self {
        self.push(name, Binding::Nested(Box::new(NestedOne { get, set })))
    }

    /// Declare a list of nested entities of type `N`.
    #[must_use]
    pub fn nested_list<N: Entity>(
        self,
        name: &'static str,
        get: fn(&E) -> Option<&[N]>,
        set: fn(&mut E, Vec<N>),
    ) -> Self {
        self.push(name, Binding::NestedList(Box::new(NestedList { get, set })))
    }

    /// Set the wire key of the most recently declared field.
    #[must_use]
    pub fn wire_key(mut self, key: &'static str) -> Self {
        match self.fields.last_mut() {
            Some(field) => field.wire_key = key,
            None => self.dangling_key = Some(key),
        }
        self
    }

    fn push(mut self, name: &'static str, binding: Binding<E>) -> Self {
        self.fields.push(FieldDescriptor {
            name,
            wire_key: name,
            binding,
        });
        self
    }

    /// Validate and finish the schema.
    ///
    /// # Errors
    /// Returns a [`SchemaError`] for empty or duplicate field names,
    /// duplicate wire keys, or wire keys that are not usable element names.
    pub fn build(self) -> Result<Schema<E>, SchemaError> {
        let entity = self.entity;

        if let Some(key) = self.dangling_key {
            return Err(SchemaError::InvalidWireKey {
                entity,
                field: "",
                key,
            });
        }

        let mut names: HashSet<&'static str> = HashSet::new();
        let mut keys: HashMap<&'static str, &'static str> = HashMap::new();

        for field in &self.fields {
            if field.name.is_empty() {
                return Err(SchemaError::EmptyFieldName { entity });
            }
            if !names.insert(field.name) {
                return Err(SchemaError::DuplicateField {
                    entity,
                    field: field.name,
                });
            }
            if !is_element_name(field.wire_key) {
                return Err(SchemaError::InvalidWireKey {
                    entity,
                    field: field.name,
                    key: field.wire_key,
                });
            }
            if let Some(first) = keys.insert(field.wire_key, field.name) {
                return Err(SchemaError::DuplicateWireKey {
                    entity,
                    key: field.wire_key,
                    first,
                    second: field.name,
                });
            }
        }

        Ok(Schema {
            entity,
            fields: self.fields,
        })
    }
}

/// Build a static schema, treating definition faults as programming errors.
///
/// Called from each entity's `schema()` accessor inside a `LazyLock`, so a
/// broken declaration panics on first use rather than at parse time.
#[allow(clippy::panic)] // Schema declarations are static; a fault is a bug
pub fn define<E: Entity>(builder: SchemaBuilder<E>) -> Schema<E> {
    match builder.build() {
        Ok(schema) => {
            tracing::debug!(entity = E::NAME, fields = schema.len(), "Entity schema initialised");
            schema
        }
        Err(err) => panic!("{err}"),
    }
}

/// Whether `key` can be both an element name and a selector step.
fn is_element_name(key: &str) -> bool {
    ELEMENT_NAME_PATTERN.is_match(key)
}
