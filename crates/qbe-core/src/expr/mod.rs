//! Boolean expression trees over entity paths.
//!
//! `Expr` is a pure, schema-agnostic tagged union. It carries no
//! evaluation semantics of its own; later passes interpret it:
//!
//! - resolution against an example (`visitor`)
//! - normalization (`normalize`)
//! - row evaluation (`eval`, used by in-memory sessions)
mod eval;
mod normalize;
mod param;
mod path;

#[cfg(test)]
mod tests;

pub use eval::{Bindings, eval};
pub use normalize::normalize;
pub use param::{Param, ParamSource};
pub use path::{FieldPath, path};

use crate::value::{EntityRef, Value};
use derive_more::Display;
use std::ops::{BitAnd, BitOr, Not};
use thiserror::Error as ThisError;

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
    NotIn,
    Contains,
    StartsWith,
    EndsWith,
    IsNull,
    IsNotNull,
}

///
/// LogicalOp
/// Boolean combinators other than AND / OR / NOT.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum LogicalOp {
    Xor,
    Xnor,
}

///
/// NodeKind
///
/// Classification surface used by tree passes.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NodeKind {
    And,
    Or,
    Not,
    /// Any other boolean combinator.
    Other(LogicalOp),
    Comparison(CompareOp),
    Path,
    Placeholder,
    /// Boolean literal (`True` / `False`).
    Constant,
    /// Non-boolean literal value.
    Literal,
}

///
/// Expr
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Expr {
    True,
    False,
    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),
    Logical(LogicalOp, Vec<Self>),
    Compare(CompareOp, Vec<Self>),
    Path(FieldPath),
    Param(Param),
    Value(Value),
}

impl Expr {
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::True | Self::False => NodeKind::Constant,
            Self::And(_) => NodeKind::And,
            Self::Or(_) => NodeKind::Or,
            Self::Not(_) => NodeKind::Not,
            Self::Logical(op, _) => NodeKind::Other(*op),
            Self::Compare(op, _) => NodeKind::Comparison(*op),
            Self::Path(_) => NodeKind::Path,
            Self::Param(_) => NodeKind::Placeholder,
            Self::Value(_) => NodeKind::Literal,
        }
    }

    /// Direct children in evaluation order.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::And(children)
            | Self::Or(children)
            | Self::Logical(_, children)
            | Self::Compare(_, children) => children,
            Self::Not(inner) => std::slice::from_ref(inner.as_ref()),
            Self::True | Self::False | Self::Path(_) | Self::Param(_) | Self::Value(_) => &[],
        }
    }

    /// Same node kind with its children replaced.
    ///
    /// Leaves ignore `children`; `Not` takes the first one.
    #[must_use]
    pub fn rebuild(&self, mut children: Vec<Self>) -> Self {
        match self {
            Self::And(_) => Self::And(children),
            Self::Or(_) => Self::Or(children),
            Self::Logical(op, _) => Self::Logical(*op, children),
            Self::Compare(op, _) => Self::Compare(*op, children),
            Self::Not(_) => {
                if children.is_empty() {
                    return self.clone();
                }
                Self::Not(Box::new(children.swap_remove(0)))
            }
            leaf => leaf.clone(),
        }
    }

    /// Number of nodes in this subtree, itself included.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        1 + self.children().iter().map(Self::subtree_len).sum::<usize>()
    }

    // ------------------------------------------------------------------
    // Builders
    // ------------------------------------------------------------------

    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self::And(vec![self, other])
    }

    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self::Or(vec![self, other])
    }

    #[allow(clippy::should_implement_trait)]
    #[must_use]
    pub fn not(self) -> Self {
        Self::Not(Box::new(self))
    }

    #[must_use]
    pub const fn xor(children: Vec<Self>) -> Self {
        Self::Logical(LogicalOp::Xor, children)
    }

    /// AND over any number of expressions; empty input yields `True`.
    #[must_use]
    pub fn all(children: impl IntoIterator<Item = Self>) -> Self {
        let mut children: Vec<_> = children.into_iter().collect();

        match children.len() {
            0 => Self::True,
            1 => children.swap_remove(0),
            _ => Self::And(children),
        }
    }

    /// Constant for a boolean value.
    #[must_use]
    pub const fn constant(value: bool) -> Self {
        if value { Self::True } else { Self::False }
    }
}

impl BitAnd for Expr {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::And(vec![self, rhs])
    }
}

impl BitOr for Expr {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::Or(vec![self, rhs])
    }
}

impl Not for Expr {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::Not(Box::new(self))
    }
}

impl From<Param> for Expr {
    fn from(param: Param) -> Self {
        Self::Param(param)
    }
}

impl From<&Param> for Expr {
    fn from(param: &Param) -> Self {
        Self::Param(param.clone())
    }
}

impl From<FieldPath> for Expr {
    fn from(path: FieldPath) -> Self {
        Self::Path(path)
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<EntityRef> for Expr {
    fn from(entity: EntityRef) -> Self {
        Self::Value(Value::Entity(entity))
    }
}

impl From<&str> for Expr {
    fn from(text: &str) -> Self {
        Self::Value(Value::from(text))
    }
}

impl From<String> for Expr {
    fn from(text: String) -> Self {
        Self::Value(Value::Text(text))
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Self::Value(Value::Bool(value))
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Self::Value(Value::Int(value))
    }
}

impl From<u64> for Expr {
    fn from(value: u64) -> Self {
        Self::Value(Value::Uint(value))
    }
}

///
/// PredicateError
///
/// Failures raised while resolving or evaluating an expression.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PredicateError {
    #[error("boolean operator '{op}' cannot be resolved against an example")]
    UnsupportedOperator { op: LogicalOp },

    #[error("entity '{entity}' has no path '{path}': {reason}")]
    UnknownPath {
        entity: &'static str,
        path: String,
        reason: String,
    },

    #[error("placeholder '{name}' has no bound value")]
    UnboundParam { name: String },

    #[error("placeholder '{name}' is not compared against any path")]
    UnpairedParam { name: String },

    #[error("placeholder '{name}' is already bound")]
    AlreadyBound { name: String },

    #[error("expression node {kind:?} does not evaluate to a boolean")]
    NotBoolean { kind: NodeKind },
}
