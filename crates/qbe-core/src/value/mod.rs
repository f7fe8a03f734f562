mod compare;
mod entity;
mod key;


pub use compare::{canonical_cmp, compare_eq, compare_order, text_contains};
pub use entity::{EntityRef, LoadState};
pub use key::Key;

use std::fmt;
use ulid::Ulid;

///
/// Value
/// Runtime value read from (or written to) an entity field.
///
/// Null        → the field holds no value.
/// Entity      → an associated (or embedded) object, possibly a lazy proxy.
/// List / Set  → collection-valued fields; `Set` keeps elements unique.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Text(String),
    Ulid(Ulid),
    Entity(EntityRef),
    List(Vec<Self>),
    Set(Vec<Self>),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_entity(&self) -> Option<&EntityRef> {
        match self {
            Self::Entity(entity) => Some(entity),
            _ => None,
        }
    }

    /// Collection elements for `List` / `Set` values.
    #[must_use]
    pub fn as_elements(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) | Self::Set(items) => Some(items),
            _ => None,
        }
    }

    /// Project this value onto its identity key, if it has one.
    ///
    /// Entities project onto their primary (or composite) key.
    #[must_use]
    pub fn as_key(&self) -> Option<Key> {
        match self {
            Self::Int(v) => Some(Key::Int(*v)),
            Self::Uint(v) => Some(Key::Uint(*v)),
            Self::Text(v) => Some(Key::Text(v.clone())),
            Self::Ulid(v) => Some(Key::Ulid(*v)),
            Self::Entity(entity) => entity.key(),
            Self::Null | Self::Bool(_) | Self::List(_) | Self::Set(_) => None,
        }
    }

    #[must_use]
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Null => ValueType::Null,
            Self::Bool(_) => ValueType::Bool,
            Self::Int(_) => ValueType::Int,
            Self::Uint(_) => ValueType::Uint,
            Self::Text(_) => ValueType::Text,
            Self::Ulid(_) => ValueType::Ulid,
            Self::Entity(entity) => ValueType::Entity(entity.entity_name()),
            Self::List(_) => ValueType::List,
            Self::Set(_) => ValueType::Set,
        }
    }

    /// Push into a `Set`, keeping elements unique; `List` always appends.
    pub fn push_element(&mut self, element: Self) {
        match self {
            Self::List(items) => items.push(element),
            Self::Set(items) => {
                if !items.contains(&element) {
                    items.push(element);
                }
            }
            _ => {}
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v:?}"),
            Self::Ulid(v) => write!(f, "{v}"),
            Self::Entity(entity) => write!(f, "{entity:?}"),
            Self::List(items) | Self::Set(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Uint(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Ulid> for Value {
    fn from(v: Ulid) -> Self {
        Self::Ulid(v)
    }
}

impl From<EntityRef> for Value {
    fn from(v: EntityRef) -> Self {
        Self::Entity(v)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

///
/// ValueType
/// Runtime type tag of a value; retyped placeholders carry one.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ValueType {
    Null,
    Bool,
    Int,
    Uint,
    Text,
    Ulid,
    Entity(&'static str),
    List,
    Set,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool => write!(f, "bool"),
            Self::Int => write!(f, "int"),
            Self::Uint => write!(f, "uint"),
            Self::Text => write!(f, "text"),
            Self::Ulid => write!(f, "ulid"),
            Self::Entity(name) => write!(f, "{name}"),
            Self::List => write!(f, "list"),
            Self::Set => write!(f, "set"),
        }
    }
}
