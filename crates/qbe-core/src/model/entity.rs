use crate::model::field::{FieldKind, FieldModel};

///
/// EntityModel
/// Static runtime model for one entity or embeddable type.
///

#[derive(Debug)]
pub struct EntityModel {
    /// Fully-qualified type path (for diagnostics).
    pub path: &'static str,
    /// Stable name used in paths, registries and error messages.
    pub entity_name: &'static str,
    /// Declared fields, supertype fields first, in declaration order.
    pub fields: &'static [FieldModel],
}

impl EntityModel {
    #[must_use]
    pub const fn new(
        path: &'static str,
        entity_name: &'static str,
        fields: &'static [FieldModel],
    ) -> Self {
        Self {
            path,
            entity_name,
            fields,
        }
    }

    /// Look up a declared field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldModel> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Simple primary key field, if the entity declares one.
    #[must_use]
    pub fn primary_key(&self) -> Option<&'static FieldModel> {
        self.fields.iter().find(|field| field.is_primary_key())
    }

    /// Embedded composite key field, if the entity declares one.
    #[must_use]
    pub fn composite_key(&self) -> Option<&'static FieldModel> {
        self.fields.iter().find(|field| field.is_composite_key())
    }

    /// Fields that take part in example inspection.
    pub fn inspectable_fields(&self) -> impl Iterator<Item = &'static FieldModel> {
        self.fields.iter().filter(|field| field.is_inspectable())
    }

    /// Whether `name` is a collection field mapped with orphan removal.
    #[must_use]
    pub fn is_orphan_removal(&self, name: &str) -> bool {
        matches!(
            self.field(name).map(|field| &field.kind),
            Some(FieldKind::Collection {
                orphan_removal: true,
                ..
            })
        )
    }
}
