use crate::{
    error::InternalError,
    model::{EntityModel, FieldKind},
    value::{Key, Value},
};
use std::{cell::RefCell, collections::BTreeMap, fmt, rc::Rc};

///
/// LoadState
///
/// Whether an instance carries its full row or only its identity.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadState {
    Loaded,
    /// Lazy reference: only the key is known, other fields are unset.
    Proxy,
}

///
/// EntityRef
///
/// Shared handle to one entity instance bound to its static model.
/// Instances are single-threaded and may form cycles (`uf.cidades[0].uf`),
/// so `Debug` never descends into associations.
///

#[derive(Clone)]
pub struct EntityRef(Rc<RefCell<EntityData>>);

struct EntityData {
    model: &'static EntityModel,
    values: BTreeMap<&'static str, Value>,
    state: LoadState,
    tracked: bool,
}

impl EntityRef {
    /// Create an empty, loaded, untracked instance.
    #[must_use]
    pub fn new(model: &'static EntityModel) -> Self {
        Self(Rc::new(RefCell::new(EntityData {
            model,
            values: BTreeMap::new(),
            state: LoadState::Loaded,
            tracked: false,
        })))
    }

    /// Create a lazy reference carrying only its key.
    ///
    /// For composite-keyed entities `key` is the embedded key object.
    pub fn proxy(model: &'static EntityModel, key: Value) -> Result<Self, InternalError> {
        let key_field = model
            .primary_key()
            .or_else(|| model.composite_key())
            .ok_or_else(|| {
                InternalError::store_invariant(format!(
                    "entity '{}' declares no key; cannot build a lazy reference",
                    model.entity_name
                ))
            })?;

        let entity = Self::new(model);
        {
            let mut data = entity.0.borrow_mut();
            data.values.insert(key_field.name, key);
            data.state = LoadState::Proxy;
        }

        Ok(entity)
    }

    /// Builder-style field assignment for constructing examples and rows.
    ///
    /// # Panics
    /// Panics if the field is not declared on the entity model.
    #[must_use]
    pub fn with(self, field: &str, value: impl Into<Value>) -> Self {
        if let Err(err) = self.set(field, value.into()) {
            panic!("{err}");
        }

        self
    }

    #[must_use]
    pub fn model(&self) -> &'static EntityModel {
        self.0.borrow().model
    }

    #[must_use]
    pub fn entity_name(&self) -> &'static str {
        self.model().entity_name
    }

    #[must_use]
    pub fn state(&self) -> LoadState {
        self.0.borrow().state
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.state() == LoadState::Loaded
    }

    /// Promote a proxy to a loaded instance once its row has been copied in.
    pub fn mark_loaded(&self) {
        self.0.borrow_mut().state = LoadState::Loaded;
    }

    /// Whether a session currently tracks this instance.
    #[must_use]
    pub fn is_tracked(&self) -> bool {
        self.0.borrow().tracked
    }

    pub fn set_tracked(&self, tracked: bool) {
        self.0.borrow_mut().tracked = tracked;
    }

    /// Read a declared field; unset fields read as `Null`.
    pub fn get(&self, field: &str) -> Result<Value, InternalError> {
        let data = self.0.borrow();
        let model = data.model;
        let declared = model
            .field(field)
            .ok_or_else(|| InternalError::unknown_field(model.entity_name, field))?;

        Ok(data.values.get(declared.name).cloned().unwrap_or_default())
    }

    /// Read a field known to be declared (iterating the model); unset reads as `Null`.
    #[must_use]
    pub fn value(&self, field: &str) -> Value {
        self.0.borrow().values.get(field).cloned().unwrap_or_default()
    }

    /// Write a declared field.
    pub fn set(&self, field: &str, value: Value) -> Result<(), InternalError> {
        let mut data = self.0.borrow_mut();
        let model = data.model;
        let declared = model
            .field(field)
            .ok_or_else(|| InternalError::unknown_field(model.entity_name, field))?;

        data.values.insert(declared.name, value);

        Ok(())
    }

    /// Navigate a dot path (`uf.id`) from this instance.
    ///
    /// A null hop short-circuits to `Null`; hopping through a non-entity
    /// value or an undeclared field is an error.
    pub fn value_at(&self, path: &str) -> Result<Value, InternalError> {
        let mut segments = path.split('.');
        let Some(first) = segments.next() else {
            return Ok(Value::Null);
        };

        let mut current = self.get(first)?;
        for segment in segments {
            current = match current {
                Value::Null => return Ok(Value::Null),
                Value::Entity(entity) => entity.get(segment)?,
                other => {
                    return Err(InternalError::store_invariant(format!(
                        "cannot read '{segment}' of non-entity value {other} along path '{path}'"
                    )));
                }
            };
        }

        Ok(current)
    }

    /// Identity key: the simple primary key, else the composite key's parts.
    #[must_use]
    pub fn key(&self) -> Option<Key> {
        let model = self.model();

        if let Some(pk) = model.primary_key() {
            return self.value(pk.name).as_key();
        }

        let composite = model.composite_key()?;
        let Value::Entity(embedded) = self.value(composite.name) else {
            return None;
        };

        let parts = embedded
            .model()
            .fields
            .iter()
            .filter(|field| field.is_inspectable())
            .map(|field| embedded.value(field.name).as_key())
            .collect::<Option<Vec<_>>>()?;

        Some(Key::Composite(parts))
    }

    /// Value stored in the key field (simple or composite).
    #[must_use]
    pub fn key_value(&self) -> Value {
        let model = self.model();

        model
            .primary_key()
            .or_else(|| model.composite_key())
            .map_or(Value::Null, |field| self.value(field.name))
    }

    /// Shallow copy of every set field into `target` (same model required).
    pub fn copy_scalars_into(&self, target: &Self) -> Result<(), InternalError> {
        if self.ptr_eq(target) {
            return Ok(());
        }

        let data = self.0.borrow();
        for field in data.model.fields {
            if matches!(
                field.kind,
                FieldKind::Relation { .. } | FieldKind::Collection { .. }
            ) {
                continue;
            }
            if let Some(value) = data.values.get(field.name) {
                target.set(field.name, value.clone())?;
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Address of the shared instance; equal exactly when `ptr_eq` holds.
    #[must_use]
    pub fn addr(&self) -> usize {
        Rc::as_ptr(&self.0).addr()
    }
}

impl PartialEq for EntityRef {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        if self.entity_name() != other.entity_name() {
            return false;
        }

        match (self.key(), other.key()) {
            (Some(left), Some(right)) => left == right,
            _ => false,
        }
    }
}

impl Eq for EntityRef {}

impl fmt::Debug for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.key() {
            Some(key) => write!(f, "{}#{key}", self.entity_name()),
            None => write!(f, "{}#?", self.entity_name()),
        }
    }
}
