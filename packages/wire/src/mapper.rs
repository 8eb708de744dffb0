//! Schema-driven mapping between wire trees, entities and structures.
//!
//! The [`Entity`] trait gives every domain type three operations backed by its
//! [`Schema`]: `parse` from a wire tree, `to_wire_form` keyed by wire keys for
//! outgoing XML, and `to_canonical_form` keyed by field names.

use crate::schema::{Binding, FieldDescriptor, Schema};
use crate::structure::{Fields, Structure};
use crate::xml::{IntoWireTree, WireTree};

/// A domain type whose shape is declared by a [`Schema`].
pub trait Entity: Default + Send + Sync + 'static {
    /// Type name used in logs and schema errors.
    const NAME: &'static str;

    /// The static field table for this type.
    fn schema() -> &'static Schema<Self>;

    /// Parse an entity from anything that may be a wire tree.
    ///
    /// Inputs that are not queryable (plain text, numbers, structures) yield
    /// `None`. Missing elements leave their fields absent.
    fn parse<'a, 'input: 'a>(input: impl IntoWireTree<'a, 'input>) -> Option<Self> {
        input.into_wire_tree().map(populate::<Self>)
    }

    /// Second pass after the generic parse, for values no descriptor can
    /// express. Default does nothing.
    fn after_parse(&mut self, _tree: WireTree<'_, '_>) {}

    /// Project to a map keyed by wire keys.
    ///
    /// Absent fields are omitted, or kept as [`Structure::Absent`] when
    /// `include_absent` is set. The flag covers this entity's own fields
    /// only; nested entities always omit their absent fields.
    fn to_wire_form(&self, include_absent: bool) -> Fields {
        project(self, Form::Wire { include_absent })
    }

    /// Project to a map keyed by field names, absent fields included.
    fn to_canonical_form(&self) -> Fields {
        project(self, Form::Canonical)
    }
}

/// Which projection is being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    /// Wire keys, for outbound XML.
    Wire { include_absent: bool },
    /// Field names, for introspection.
    Canonical,
}

impl Form {
    fn key<E>(self, field: &FieldDescriptor<E>) -> &'static str {
        match self {
            Self::Wire { .. } => field.wire_key(),
            Self::Canonical => field.name(),
        }
    }

    fn keeps_absent(self) -> bool {
        match self {
            Self::Wire { include_absent } => include_absent,
            Self::Canonical => true,
        }
    }

    fn project<N: Entity>(self, entity: &N) -> Structure {
        match self {
            Self::Wire { .. } => entity.to_wire_form(false).into(),
            Self::Canonical => entity.to_canonical_form().into(),
        }
    }
}

/// Populate a fresh entity from a wire tree, field by field in schema order.
pub fn populate<E: Entity>(tree: WireTree<'_, '_>) -> E {
    let mut entity = E::default();

    for field in E::schema().fields() {
        read_field(&mut entity, field, tree);
    }

    entity.after_parse(tree);
    tracing::trace!(entity = E::NAME, scope = ?tree.tag_name(), "Parsed entity");
    entity
}

fn read_field<E: Entity>(entity: &mut E, field: &FieldDescriptor<E>, tree: WireTree<'_, '_>) {
    let key = field.wire_key();

    match field.binding() {
        Binding::Scalar { set, .. } => {
            if let Some(text) = tree.first_match_text(key) {
                set(entity, text);
            }
        }
        Binding::ScalarList { set, .. } => {
            let texts = tree
                .all_matches(key)
                .iter()
                .map(|m| m.inner_text())
                .collect();
            set(entity, texts);
        }
        Binding::Nested(nested) | Binding::NestedList(nested) => nested.read(entity, tree, key),
    }
}

/// Build a projection of `entity` for the given form.
pub fn project<E: Entity>(entity: &E, form: Form) -> Fields {
    let mut fields = Fields::new();

    for field in E::schema().fields() {
        match project_field(entity, field, form) {
            Some(value) => {
                fields.insert(form.key(field), value);
            }
            None if form.keeps_absent() => {
                fields.insert(form.key(field), Structure::Absent);
            }
            None => {}
        }
    }

    fields
}

fn project_field<E: Entity>(entity: &E, field: &FieldDescriptor<E>, form: Form) -> Option<Structure> {
    match field.binding() {
        Binding::Scalar { get, .. } => get(entity).map(Structure::from),
        Binding::ScalarList { get, .. } => get(entity).map(|texts| texts.to_vec().into()),
        Binding::Nested(nested) | Binding::NestedList(nested) => nested.project(entity, form),
    }
}

/// Type-erased access to a nested entity field of `E`.
///
/// Implemented for single and list fields so the schema can hold bindings to
/// different nested types side by side.
pub trait NestedBinding<E>: Send + Sync {
    /// Name of the nested entity type.
    fn nested_type(&self) -> &'static str;

    /// Parse the nested value(s) found under `key` into `entity`.
    fn read(&self, entity: &mut E, tree: WireTree<'_, '_>, key: &str);

    /// Project the nested value(s), `None` when absent.
    fn project(&self, entity: &E, form: Form) -> Option<Structure>;
}

/// Binding for a single nested entity.
pub struct NestedOne<E, N> {
    pub(crate) get: fn(&E) -> Option<&N>,
    pub(crate) set: fn(&mut E, N),
}

impl<E: Entity, N: Entity> NestedBinding<E> for NestedOne<E, N> {
    fn nested_type(&self) -> &'static str {
        N::NAME
    }

    fn read(&self, entity: &mut E, tree: WireTree<'_, '_>, key: &str) {
        if let Some(nested) = N::parse(tree.first_match(key)) {
            (self.set)(entity, nested);
        }
    }

    fn project(&self, entity: &E, form: Form) -> Option<Structure> {
        (self.get)(entity).map(|nested| form.project(nested))
    }
}

/// Binding for a list of nested entities.
pub struct NestedList<E, N> {
    pub(crate) get: fn(&E) -> Option<&[N]>,
    pub(crate) set: fn(&mut E, Vec<N>),
}

impl<E: Entity, N: Entity> NestedBinding<E> for NestedList<E, N> {
    fn nested_type(&self) -> &'static str {
        N::NAME
    }

    fn read(&self, entity: &mut E, tree: WireTree<'_, '_>, key: &str) {
        let items = tree.all_matches(key).into_iter().filter_map(N::parse).collect();
        (self.set)(entity, items);
    }

    fn project(&self, entity: &E, form: Form) -> Option<Structure> {
        (self.get)(entity)
            .map(|items| Structure::Seq(items.iter().map(|item| form.project(item)).collect()))
    }
}
