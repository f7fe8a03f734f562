use crate::value::ValueType;
use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::atomic::{AtomicU64, Ordering},
};

static NEXT_PARAM_ID: AtomicU64 = AtomicU64::new(1);

///
/// ParamSource
/// Where a placeholder's value comes from.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParamSource {
    /// Resolved from the filter's example through its paired path.
    Example,
    /// Bound explicitly by the caller (`Filter::bind`).
    Caller,
}

///
/// Param
///
/// Named, typed slot in an expression. Generic placeholders are written by
/// callers; retyped placeholders (carrying the runtime value type) are
/// produced during resolution. Equality and hashing use the name only.
///

#[derive(Clone, Debug)]
pub struct Param {
    name: String,
    source: ParamSource,
    value_type: Option<ValueType>,
}

impl Param {
    /// Fresh example-bound placeholder with a process-unique name.
    #[must_use]
    pub fn example() -> Self {
        let id = NEXT_PARAM_ID.fetch_add(1, Ordering::Relaxed);

        Self {
            name: format!("qbe_p{id}"),
            source: ParamSource::Example,
            value_type: None,
        }
    }

    /// Caller-bound placeholder with an explicit name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: ParamSource::Caller,
            value_type: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn source(&self) -> ParamSource {
        self.source
    }

    #[must_use]
    pub const fn value_type(&self) -> Option<ValueType> {
        self.value_type
    }

    #[must_use]
    pub const fn is_example(&self) -> bool {
        matches!(self.source, ParamSource::Example)
    }

    /// Whether resolution already replaced this slot with a typed one.
    #[must_use]
    pub const fn is_retyped(&self) -> bool {
        self.value_type.is_some()
    }

    /// Same-named placeholder carrying the runtime type of its value.
    #[must_use]
    pub fn retyped(&self, value_type: ValueType) -> Self {
        Self {
            name: self.name.clone(),
            source: self.source,
            value_type: Some(value_type),
        }
    }
}

impl PartialEq for Param {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Param {}

impl Hash for Param {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value_type {
            Some(value_type) => write!(f, ":{}<{value_type}>", self.name),
            None => write!(f, ":{}", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_params_get_unique_names() {
        let first = Param::example();
        let second = Param::example();

        assert_ne!(first, second);
        assert!(first.is_example());
        assert!(!first.is_retyped());
    }

    #[test]
    fn retyped_param_keeps_identity() {
        let generic = Param::example();
        let typed = generic.retyped(ValueType::Text);

        assert_eq!(generic, typed);
        assert_eq!(typed.value_type(), Some(ValueType::Text));
        assert_eq!(typed.to_string(), format!(":{}<text>", generic.name()));
    }
}
