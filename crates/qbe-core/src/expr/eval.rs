use crate::{
    expr::{CompareOp, Expr, LogicalOp, PredicateError},
    value::{EntityRef, Value, compare_eq, compare_order, text_contains},
};
use derive_more::{Deref, IntoIterator};
use std::{cmp::Ordering, collections::BTreeMap};

///
/// Bindings
///
/// Placeholder values keyed by placeholder name. A name is bound at most once.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq)]
pub struct Bindings(BTreeMap<String, Value>);

impl Bindings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, name: impl Into<String>, value: Value) -> Result<(), PredicateError> {
        let name = name.into();
        if self.0.contains_key(&name) {
            return Err(PredicateError::AlreadyBound { name });
        }
        self.0.insert(name, value);

        Ok(())
    }

    pub fn resolve(&self, name: &str) -> Result<&Value, PredicateError> {
        self.0.get(name).ok_or_else(|| PredicateError::UnboundParam {
            name: name.to_string(),
        })
    }
}

///
/// Evaluate a boolean expression against one entity instance.
///
/// Paths navigate from `row`; placeholders read from `bindings`.
/// Comparisons that are not defined for the operand types (including any
/// comparison against `Null`) evaluate to `false`, like SQL `UNKNOWN`
/// filtered out of a WHERE clause.
///
pub fn eval(row: &EntityRef, expr: &Expr, bindings: &Bindings) -> Result<bool, PredicateError> {
    match expr {
        Expr::True => Ok(true),
        Expr::False => Ok(false),

        Expr::And(children) => {
            for child in children {
                if !eval(row, child, bindings)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        Expr::Or(children) => {
            for child in children {
                if eval(row, child, bindings)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        Expr::Not(inner) => Ok(!eval(row, inner, bindings)?),

        Expr::Logical(op, children) => {
            let mut odd = false;
            for child in children {
                odd ^= eval(row, child, bindings)?;
            }
            Ok(match op {
                LogicalOp::Xor => odd,
                LogicalOp::Xnor => !odd,
            })
        }

        Expr::Compare(op, operands) => eval_compare(row, *op, operands, bindings),

        Expr::Value(Value::Bool(value)) => Ok(*value),
        Expr::Path(_) | Expr::Param(_) | Expr::Value(_) => Err(PredicateError::NotBoolean {
            kind: expr.kind(),
        }),
    }
}

// Resolve one operand of a comparison to a runtime value.
fn operand(row: &EntityRef, expr: &Expr, bindings: &Bindings) -> Result<Value, PredicateError> {
    match expr {
        Expr::Path(path) => row
            .value_at(path.as_str())
            .map_err(|err| PredicateError::UnknownPath {
                entity: row.entity_name(),
                path: path.to_string(),
                reason: err.message,
            }),
        Expr::Param(param) => bindings.resolve(param.name()).cloned(),
        Expr::Value(value) => Ok(value.clone()),
        boolean => eval(row, boolean, bindings).map(Value::Bool),
    }
}

fn eval_compare(
    row: &EntityRef,
    op: CompareOp,
    operands: &[Expr],
    bindings: &Bindings,
) -> Result<bool, PredicateError> {
    let mut values = Vec::with_capacity(operands.len());
    for expr in operands {
        values.push(operand(row, expr, bindings)?);
    }

    let (left, right) = match values.as_slice() {
        [left] => (left, &Value::Null),
        [left, right, ..] => (left, right),
        [] => return Ok(false),
    };

    // NOTE: undefined comparisons are treated as non-matches.
    let matched = match op {
        CompareOp::Eq => compare_eq(left, right).unwrap_or(false),
        CompareOp::Ne => compare_eq(left, right).is_some_and(|eq| !eq),

        CompareOp::Lt => compare_order(left, right).is_some_and(Ordering::is_lt),
        CompareOp::Lte => compare_order(left, right).is_some_and(Ordering::is_le),
        CompareOp::Gt => compare_order(left, right).is_some_and(Ordering::is_gt),
        CompareOp::Gte => compare_order(left, right).is_some_and(Ordering::is_ge),

        CompareOp::In => in_list(left, right).unwrap_or(false),
        CompareOp::NotIn => in_list(left, right).is_some_and(|found| !found),

        CompareOp::Contains => contains(left, right),
        CompareOp::StartsWith => match (left, right) {
            (Value::Text(text), Value::Text(prefix)) => text.starts_with(prefix.as_str()),
            _ => false,
        },
        CompareOp::EndsWith => match (left, right) {
            (Value::Text(text), Value::Text(suffix)) => text.ends_with(suffix.as_str()),
            _ => false,
        },

        CompareOp::IsNull => left.is_null(),
        CompareOp::IsNotNull => !left.is_null(),
    };

    Ok(matched)
}

// Whether `actual` equals any element of `list`; `None` if no element was comparable.
fn in_list(actual: &Value, list: &Value) -> Option<bool> {
    let items = list.as_elements()?;

    let mut saw_valid = false;
    for item in items {
        match compare_eq(actual, item) {
            Some(true) => return Some(true),
            Some(false) => saw_valid = true,
            None => {}
        }
    }

    saw_valid.then_some(false)
}

// Text substring or collection membership.
fn contains(actual: &Value, needle: &Value) -> bool {
    if let Some(found) = text_contains(actual, needle) {
        return found;
    }

    actual.as_elements().is_some_and(|items| {
        items
            .iter()
            .any(|item| compare_eq(item, needle).unwrap_or(false))
    })
}
