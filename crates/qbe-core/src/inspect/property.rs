use crate::{expr::FieldPath, model::FieldModel, value::Value};
use std::{cell::OnceCell, fmt, rc::Rc};

///
/// Property
///
/// One filled field found while inspecting an example. Nested properties
/// keep a shared link to the association they were reached through, so the
/// dot path (`uf.sigla`) is derived from the chain and cached on first use.
///

pub struct Property {
    field: &'static FieldModel,
    parent: Option<Rc<Self>>,
    value: Value,
    dot_path: OnceCell<String>,
}

impl Property {
    #[must_use]
    pub const fn new(field: &'static FieldModel, parent: Option<Rc<Self>>, value: Value) -> Self {
        Self {
            field,
            parent,
            value,
            dot_path: OnceCell::new(),
        }
    }

    #[must_use]
    pub const fn field(&self) -> &'static FieldModel {
        self.field
    }

    #[must_use]
    pub fn parent(&self) -> Option<&Self> {
        self.parent.as_deref()
    }

    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    /// Replace the inspected value before synthesis.
    pub fn set_value(&mut self, value: Value) {
        self.value = value;
    }

    /// Dot path from the example root, computed once.
    #[must_use]
    pub fn dot_path(&self) -> &str {
        self.dot_path.get_or_init(|| match &self.parent {
            Some(parent) => format!("{}.{}", parent.dot_path(), self.field.name),
            None => self.field.name.to_string(),
        })
    }

    #[must_use]
    pub fn path(&self) -> FieldPath {
        FieldPath::new(self.dot_path())
    }

    /// Whether the property stands for a whole associated object.
    #[must_use]
    pub const fn is_association(&self) -> bool {
        self.field.is_relation()
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("path", &self.dot_path())
            .field("value", &self.value)
            .finish()
    }
}
