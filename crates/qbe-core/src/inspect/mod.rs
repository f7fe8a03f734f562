//! Example inspection: which fields of a partially-filled example carry
//! filter values.
mod property;


pub use property::Property;

use crate::{
    model::FieldKind,
    value::{EntityRef, Value},
};
use std::rc::Rc;
use tracing::{trace, warn};

///
/// Inspection
///
/// Filled properties in declaration order per level, plus the association
/// paths the depth limit kept the inspector from descending into.
///

#[derive(Debug, Default)]
pub struct Inspection {
    properties: Vec<Property>,
    truncated: Vec<String>,
}

impl Inspection {
    #[must_use]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut [Property] {
        &mut self.properties
    }

    #[must_use]
    pub fn into_properties(self) -> Vec<Property> {
        self.properties
    }

    /// Association paths left uninspected because of the depth limit.
    #[must_use]
    pub fn truncated(&self) -> &[String] {
        &self.truncated
    }

    /// Dot paths of every filled property.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(Property::dot_path)
    }
}

///
/// ExampleInspector
///

#[derive(Clone, Copy, Debug)]
pub struct ExampleInspector {
    max_depth: usize,
}

impl ExampleInspector {
    #[must_use]
    pub const fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Collect the filled properties of `example`.
    ///
    /// Associations that `is_initialized` rejects (lazy proxies) are
    /// skipped. An initialized association with a filled key (simple, or
    /// every part of a composite one) becomes one property for the whole
    /// object; otherwise its own fields are inspected while the depth limit
    /// allows. The root sits at depth 1 and its own primary key never
    /// short-circuits it.
    pub fn extract_filled(
        &self,
        example: &EntityRef,
        is_initialized: impl Fn(&EntityRef) -> bool,
    ) -> Inspection {
        let mut inspection = Inspection::default();
        self.inspect(&mut inspection, example, None, 1, &is_initialized);

        inspection
    }

    fn inspect(
        &self,
        out: &mut Inspection,
        entity: &EntityRef,
        parent: Option<&Rc<Property>>,
        depth: usize,
        is_initialized: &impl Fn(&EntityRef) -> bool,
    ) {
        for field in entity.model().inspectable_fields() {
            let property = Property::new(field, parent.cloned(), entity.value(field.name));

            match &field.kind {
                FieldKind::Collection { .. } => {}

                FieldKind::CompositeKey { .. } => {
                    let Value::Entity(key) = property.value().clone() else {
                        continue;
                    };
                    // embedded key parts sit on the owner's level
                    self.inspect(out, &key, Some(&Rc::new(property)), depth, is_initialized);
                }

                FieldKind::Relation { .. } => {
                    let Value::Entity(associated) = property.value().clone() else {
                        continue;
                    };
                    if !is_initialized(&associated) {
                        trace!(path = property.dot_path(), "skipping uninitialized association");
                        continue;
                    }

                    if associated.key().is_some() {
                        out.properties.push(property);
                    } else if depth <= self.max_depth {
                        self.inspect(
                            out,
                            &associated,
                            Some(&Rc::new(property)),
                            depth + 1,
                            is_initialized,
                        );
                    } else {
                        warn!(
                            path = property.dot_path(),
                            max_depth = self.max_depth,
                            "association not inspected: depth limit reached"
                        );
                        out.truncated.push(property.dot_path().to_string());
                    }
                }

                FieldKind::Scalar(_) | FieldKind::PrimaryKey(_) => {
                    if is_filled(property.value()) {
                        out.properties.push(property);
                    }
                }
            }
        }
    }
}

// Non-null, and non-blank for text.
fn is_filled(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Text(text) => !text.trim().is_empty(),
        _ => true,
    }
}
